// src/analysis/group_select.rs
//! Comparison-group partitioning and best-configuration selection

use crate::table::{GroupKey, ResultRecord};
use std::collections::BTreeMap;

/// Partition records by (arch, question, workload), each group sorted
/// ascending by L1 size. BTreeMap keeps group order independent of input
/// row order.
pub fn group_records(records: &[ResultRecord]) -> BTreeMap<GroupKey, Vec<ResultRecord>> {
    let mut groups: BTreeMap<GroupKey, Vec<ResultRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(GroupKey::of(record))
            .or_default()
            .push(record.clone());
    }
    for rows in groups.values_mut() {
        rows.sort_by_key(|r| r.l1_kb);
    }
    groups
}

/// Best L1 size within one group.
///
/// Prefer the minimum cycle count among rows that have one; any
/// cycle-bearing row outranks every IPC-only row. Fall back to the maximum
/// IPC, and to no answer when neither metric exists in the group. Strict
/// comparisons over the ascending-sorted rows break ties toward the
/// smallest L1 size.
pub fn best_l1(rows: &[ResultRecord]) -> Option<u32> {
    let mut min_cycles: Option<(u64, u32)> = None;
    for row in rows {
        if let Some(cycles) = row.num_cycles {
            match min_cycles {
                Some((best, _)) if cycles >= best => {}
                _ => min_cycles = Some((cycles, row.l1_kb)),
            }
        }
    }
    if let Some((_, l1_kb)) = min_cycles {
        return Some(l1_kb);
    }

    let mut max_ipc: Option<(f64, u32)> = None;
    for row in rows {
        if let Some(ipc) = row.ipc {
            match max_ipc {
                Some((best, _)) if ipc <= best => {}
                _ => max_ipc = Some((ipc, row.l1_kb)),
            }
        }
    }
    max_ipc.map(|(_, l1_kb)| l1_kb)
}

/// Best configuration for every group, in deterministic group order.
pub fn best_per_group(
    groups: &BTreeMap<GroupKey, Vec<ResultRecord>>,
) -> Vec<(GroupKey, Option<u32>)> {
    groups
        .iter()
        .map(|(key, rows)| (key.clone(), best_l1(rows)))
        .collect()
}
