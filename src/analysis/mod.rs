// src/analysis/mod.rs
//! Analysis pipeline: cross-table joins, derived efficiency metrics,
//! best-configuration selection, and report/chart-series emission.

pub mod chart_series;
pub mod efficiency;
pub mod group_select;
pub mod key_index;
pub mod report;

// Re-export key analysis types
pub use chart_series::{efficiency_series_by_arch, metric_series, MetricSeries};
pub use efficiency::{area_efficiency, power_efficiency, selected};
pub use group_select::{best_l1, best_per_group, group_records};
pub use key_index::AreaIndex;
pub use report::{write_best_config_report, write_efficiency_report, Normalizer};
