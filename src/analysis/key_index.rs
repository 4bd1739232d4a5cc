// src/analysis/key_index.rs
//! Composite-key lookup over area records for cross-table joins

use crate::table::AreaRecord;
use std::collections::HashMap;

/// Area records indexed by the (architecture, L1 size) join key.
///
/// On duplicate keys the later record wins, so input order determines the
/// final value. A lookup miss means the dependent result row has no area
/// estimate and must be skipped, not zeroed.
#[derive(Debug, Clone, Default)]
pub struct AreaIndex {
    map: HashMap<(String, u32), AreaRecord>,
}

impl AreaIndex {
    pub fn from_records(records: Vec<AreaRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            map.insert((record.arch.clone(), record.l1_kb), record);
        }
        Self { map }
    }

    pub fn get(&self, arch: &str, l1_kb: u32) -> Option<&AreaRecord> {
        self.map.get(&(arch.to_string(), l1_kb))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
