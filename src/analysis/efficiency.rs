// src/analysis/efficiency.rs
//! Normalized efficiency metrics: IPC per mW and IPC per mm^2
//!
//! Rows enter a comparison only through the configured selection predicate.
//! A row with no matching power figure or area record is dropped; a zero or
//! unavailable denominator keeps the row with a NaN ratio so the gap stays
//! visible in the report.

use crate::analysis::key_index::AreaIndex;
use crate::config::AnalysisConfig;
use crate::table::{EfficiencyRecord, ResultRecord};

/// True when the configured comparison admits this row.
pub fn selected(record: &ResultRecord, config: &AnalysisConfig) -> bool {
    match config.selection_for(&record.arch) {
        Some(rule) => {
            record.question == rule.question && rule.l1_sizes_kb.contains(&record.l1_kb)
        }
        None => false,
    }
}

/// Energy efficiency: IPC per mW against the fixed per-architecture power
/// table. Rows whose architecture has no power figure are dropped.
pub fn power_efficiency(
    records: &[ResultRecord],
    config: &AnalysisConfig,
) -> Vec<EfficiencyRecord> {
    records
        .iter()
        .filter(|r| selected(r, config))
        .filter_map(|r| {
            let power = config.power_for(&r.arch)?;
            Some(derive(r, power))
        })
        .collect()
}

/// Surface efficiency: IPC per mm^2 of total core+L1+L2 area. Rows with no
/// area record under the (arch, l1_kB) join key are dropped.
pub fn area_efficiency(
    records: &[ResultRecord],
    areas: &AreaIndex,
    config: &AnalysisConfig,
) -> Vec<EfficiencyRecord> {
    records
        .iter()
        .filter(|r| selected(r, config))
        .filter_map(|r| {
            let area = areas.get(&r.arch, r.l1_kb)?;
            Some(derive(r, area.total_mm2))
        })
        .collect()
}

fn derive(record: &ResultRecord, denom: f64) -> EfficiencyRecord {
    // Unavailable IPC stays NaN rather than silently zero; the row remains
    // in the report as an audit trail.
    let ipc = record.ipc.unwrap_or(f64::NAN);
    let ratio = if denom == 0.0 { f64::NAN } else { ipc / denom };

    EfficiencyRecord {
        arch: record.arch.clone(),
        workload: record.workload.clone(),
        l1_kb: record.l1_kb,
        ipc,
        denom,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::AreaRecord;

    fn record(arch: &str, question: &str, l1_kb: u32, ipc: Option<f64>) -> ResultRecord {
        ResultRecord {
            arch: arch.to_string(),
            question: question.to_string(),
            workload: "qsort".to_string(),
            l1_kb,
            sim_seconds: None,
            sim_insts: None,
            num_cycles: None,
            ipc,
            cpi: None,
            icache_miss: None,
            dcache_miss: None,
            l2_miss: None,
            bp_mispred_rate: None,
            branch_mispredicts: None,
            outdir: String::new(),
        }
    }

    #[test]
    fn test_selection_predicate() {
        let config = AnalysisConfig::default_study();

        assert!(selected(&record("a7", "Q4", 4, None), &config));
        // Wrong question for the architecture
        assert!(!selected(&record("a7", "Q5", 4, None), &config));
        // L1 size outside the admitted set
        assert!(!selected(&record("a7", "Q4", 32, None), &config));
        // Unknown architecture
        assert!(!selected(&record("a53", "Q4", 4, None), &config));
    }

    #[test]
    fn test_power_efficiency_ratios() {
        let config = AnalysisConfig::default_study();
        let records = vec![
            record("a7", "Q4", 4, Some(0.40)),
            record("a7", "Q4", 8, Some(0.55)),
        ];

        let rows = power_efficiency(&records, &config);
        assert_eq!(rows.len(), 2);
        assert!((rows[0].ratio - 0.0040).abs() < 1e-12);
        assert!((rows[1].ratio - 0.0055).abs() < 1e-12);
        assert_eq!(rows[0].denom, 100.0);
    }

    #[test]
    fn test_missing_power_drops_row() {
        let mut config = AnalysisConfig::default_study();
        config.power_mw.remove("a7");

        let records = vec![record("a7", "Q4", 4, Some(0.40))];
        assert!(power_efficiency(&records, &config).is_empty());
    }

    #[test]
    fn test_zero_power_yields_nan() {
        let mut config = AnalysisConfig::default_study();
        config.power_mw.insert("a7".to_string(), 0.0);

        let rows = power_efficiency(&[record("a7", "Q4", 4, Some(0.40))], &config);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ratio.is_nan());
    }

    #[test]
    fn test_unavailable_ipc_yields_nan_row() {
        let config = AnalysisConfig::default_study();

        let rows = power_efficiency(&[record("a7", "Q4", 4, None)], &config);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].ipc.is_nan());
        assert!(rows[0].ratio.is_nan());
    }

    #[test]
    fn test_area_efficiency_join() {
        let config = AnalysisConfig::default_study();
        let areas = AreaIndex::from_records(vec![AreaRecord {
            arch: "a7".to_string(),
            l1_kb: 4,
            l1_total_mm2: 0.05,
            l2_one_mm2: 0.41,
            core_wo_l1_mm2: 0.45,
            total_mm2: 0.80,
        }]);

        let records = vec![
            record("a7", "Q4", 4, Some(0.40)),
            // No area record for 8 kB: dropped, not zeroed
            record("a7", "Q4", 8, Some(0.55)),
        ];

        let rows = area_efficiency(&records, &areas, &config);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].l1_kb, 4);
        assert!((rows[0].ratio - 0.5).abs() < 1e-12);
    }
}
