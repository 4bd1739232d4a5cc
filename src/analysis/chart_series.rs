// src/analysis/chart_series.rs
//! Chart-ready series adaptation
//!
//! The renderer's contract is "ordered (x, y) series per named group, with
//! explicit gaps where a value is unavailable". This layer only groups,
//! sorts, and extracts; all numeric derivation happens upstream.

use crate::table::{EfficiencyRecord, ResultRecord};
use std::collections::BTreeMap;

/// One named line: ascending L1 sizes with an optional value per point.
/// `None` is a gap, never interpolated and never zero.
#[derive(Debug, Clone)]
pub struct MetricSeries {
    pub label: String,
    pub points: Vec<(u32, Option<f64>)>,
}

impl MetricSeries {
    /// Contiguous runs of plottable points, cut at gaps, so a rendered line
    /// breaks instead of bridging missing data. Non-finite values count as
    /// gaps too.
    pub fn segments(&self) -> Vec<Vec<(u32, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(u32, f64)> = Vec::new();

        for &(x, y) in &self.points {
            match y {
                Some(value) if value.is_finite() => current.push((x, value)),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn has_data(&self) -> bool {
        self.points
            .iter()
            .any(|(_, y)| matches!(y, Some(v) if v.is_finite()))
    }
}

/// Extract one metric from a group's rows (already sorted ascending by L1
/// size) as a gap-preserving series.
pub fn metric_series(
    label: &str,
    rows: &[ResultRecord],
    metric: impl Fn(&ResultRecord) -> Option<f64>,
) -> MetricSeries {
    MetricSeries {
        label: label.to_string(),
        points: rows.iter().map(|r| (r.l1_kb, metric(r))).collect(),
    }
}

/// Efficiency ratios grouped per architecture, one series per workload,
/// points ascending by L1 size. NaN ratios become gaps in the series while
/// staying visible in the CSV report.
pub fn efficiency_series_by_arch(
    records: &[EfficiencyRecord],
) -> BTreeMap<String, Vec<MetricSeries>> {
    let mut grouped: BTreeMap<(String, String), Vec<(u32, f64)>> = BTreeMap::new();
    for record in records {
        grouped
            .entry((record.arch.clone(), record.workload.clone()))
            .or_default()
            .push((record.l1_kb, record.ratio));
    }

    let mut by_arch: BTreeMap<String, Vec<MetricSeries>> = BTreeMap::new();
    for ((arch, workload), mut points) in grouped {
        points.sort_by_key(|&(l1_kb, _)| l1_kb);
        let series = MetricSeries {
            label: workload,
            points: points
                .into_iter()
                .map(|(x, y)| (x, if y.is_finite() { Some(y) } else { None }))
                .collect(),
        };
        by_arch.entry(arch).or_default().push(series);
    }
    by_arch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: Vec<(u32, Option<f64>)>) -> MetricSeries {
        MetricSeries {
            label: "test".to_string(),
            points,
        }
    }

    #[test]
    fn test_segments_split_at_gaps() {
        let s = series(vec![
            (1, Some(0.5)),
            (2, Some(0.6)),
            (4, None),
            (8, Some(0.7)),
        ]);

        let segments = s.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(1, 0.5), (2, 0.6)]);
        assert_eq!(segments[1], vec![(8, 0.7)]);
    }

    #[test]
    fn test_non_finite_values_are_gaps() {
        let s = series(vec![(1, Some(0.5)), (2, Some(f64::NAN)), (4, Some(0.7))]);
        let segments = s.segments();
        assert_eq!(segments.len(), 2);

        let s = series(vec![(1, Some(f64::INFINITY))]);
        assert!(!s.has_data());
        assert!(s.segments().is_empty());
    }

    #[test]
    fn test_efficiency_series_grouping() {
        let record = |arch: &str, workload: &str, l1_kb: u32, ratio: f64| EfficiencyRecord {
            arch: arch.to_string(),
            workload: workload.to_string(),
            l1_kb,
            ipc: 0.5,
            denom: 100.0,
            ratio,
        };

        let records = vec![
            record("a7", "qsort", 8, 0.0055),
            record("a7", "qsort", 4, 0.0040),
            record("a7", "sha", 4, f64::NAN),
            record("a15", "qsort", 4, 0.0011),
        ];

        let by_arch = efficiency_series_by_arch(&records);
        assert_eq!(by_arch.len(), 2);

        let a7 = &by_arch["a7"];
        assert_eq!(a7.len(), 2);
        assert_eq!(a7[0].label, "qsort");
        // Sorted ascending despite input order
        assert_eq!(a7[0].points, vec![(4, Some(0.0040)), (8, Some(0.0055))]);
        // NaN ratio arrives as a gap
        assert_eq!(a7[1].points, vec![(4, None)]);
    }
}
