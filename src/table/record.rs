// src/table/record.rs
//! Typed rows for the simulator and area result tables
//!
//! Optional metrics are `Option<_>` so an unavailable value is never
//! conflated with zero.

use serde::{Deserialize, Serialize};

/// One simulated run from the simulator summary table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub arch: String,
    pub question: String,
    pub workload: String,
    /// L1 size in kB, with L1I = L1D. The independent variable under
    /// comparison.
    pub l1_kb: u32,
    pub sim_seconds: Option<f64>,
    pub sim_insts: Option<u64>,
    pub num_cycles: Option<u64>,
    pub ipc: Option<f64>,
    pub cpi: Option<f64>,
    pub icache_miss: Option<f64>,
    pub dcache_miss: Option<f64>,
    pub l2_miss: Option<f64>,
    pub bp_mispred_rate: Option<f64>,
    pub branch_mispredicts: Option<u64>,
    /// Simulator output directory the row came from.
    pub outdir: String,
}

/// One area estimate from the area-estimation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaRecord {
    pub arch: String,
    pub l1_kb: u32,
    pub l1_total_mm2: f64,
    pub l2_one_mm2: f64,
    pub core_wo_l1_mm2: f64,
    pub total_mm2: f64,
}

/// Derived efficiency row: IPC normalized by power (mW) or area (mm^2).
///
/// `ipc` and `ratio` are NaN when the source value was unavailable or the
/// denominator was zero; the row stays visible in reports for auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfficiencyRecord {
    pub arch: String,
    pub workload: String,
    pub l1_kb: u32,
    pub ipc: f64,
    pub denom: f64,
    pub ratio: f64,
}

/// Comparison-group identity: rows sharing (arch, question, workload).
///
/// Ordered so that grouping output is stable regardless of input row order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub arch: String,
    pub question: String,
    pub workload: String,
}

impl GroupKey {
    pub fn of(record: &ResultRecord) -> Self {
        Self {
            arch: record.arch.clone(),
            question: record.question.clone(),
            workload: record.workload.clone(),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} - {}", self.arch.to_uppercase(), self.question, self.workload)
    }
}
