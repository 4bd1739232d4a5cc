// src/analysis/report.rs
//! Deterministic CSV emission for derived records
//!
//! Rows sort by (arch, workload, l1_kB) ascending and every numeric field
//! uses a fixed precision, so repeated runs on the same input are
//! byte-identical. Undefined ratios serialize as the literal `NaN` token.

use crate::table::{EfficiencyRecord, GroupKey};
use std::path::Path;

/// Which secondary metric normalizes the report's ratio column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Fixed power budget in mW.
    Power,
    /// Total core+L1+L2 area in mm^2.
    Area,
}

impl Normalizer {
    fn header(&self) -> &'static str {
        match self {
            Normalizer::Power => "arch,workload,l1_kB,ipc,power_mW,eff_ipc_per_mW",
            Normalizer::Area => "arch,workload,l1_kB,ipc,surface_mm2,eff_ipc_per_mm2",
        }
    }

    fn format_row(&self, r: &EfficiencyRecord) -> String {
        match self {
            Normalizer::Power => format!(
                "{},{},{},{},{},{}\n",
                r.arch,
                r.workload,
                r.l1_kb,
                fixed(r.ipc, 6),
                fixed(r.denom, 1),
                fixed(r.ratio, 8),
            ),
            Normalizer::Area => format!(
                "{},{},{},{},{},{}\n",
                r.arch,
                r.workload,
                r.l1_kb,
                fixed(r.ipc, 6),
                fixed(r.denom, 7),
                fixed(r.ratio, 7),
            ),
        }
    }
}

/// Fixed-precision, locale-independent field text; NaN keeps its token
/// instead of a fabricated number.
fn fixed(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.*}", precision, value)
    }
}

/// Serialize an efficiency table, creating missing parent directories and
/// overwriting any previous report.
pub fn write_efficiency_report<P: AsRef<Path>>(
    records: &[EfficiencyRecord],
    normalizer: Normalizer,
    path: P,
) -> Result<(), String> {
    let mut sorted: Vec<&EfficiencyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        (&a.arch, &a.workload, a.l1_kb).cmp(&(&b.arch, &b.workload, b.l1_kb))
    });

    let mut csv = String::new();
    csv.push_str(normalizer.header());
    csv.push('\n');
    for record in sorted {
        csv.push_str(&normalizer.format_row(record));
    }

    write_report(&csv, path)
}

/// Serialize the best-configuration summary, one row per comparison group.
/// Groups with no usable metric report `NA` instead of an invented size.
pub fn write_best_config_report<P: AsRef<Path>>(
    best: &[(GroupKey, Option<u32>)],
    path: P,
) -> Result<(), String> {
    let mut csv = String::from("arch,question,workload,best_l1_kB\n");
    for (key, l1_kb) in best {
        let value = match l1_kb {
            Some(size) => size.to_string(),
            None => "NA".to_string(),
        };
        csv.push_str(&format!(
            "{},{},{},{}\n",
            key.arch, key.question, key.workload, value
        ));
    }

    write_report(&csv, path)
}

fn write_report<P: AsRef<Path>>(csv: &str, path: P) -> Result<(), String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }

    std::fs::write(path, csv).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}
