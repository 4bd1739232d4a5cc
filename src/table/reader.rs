// src/table/reader.rs
//! CSV table ingestion for simulator and area summaries
//!
//! Parsing is permissive at row granularity: a row with a missing required
//! column or non-`NA` garbage in a numeric slot is dropped and the rest of
//! the table still parses. A table with zero usable rows is an error, since
//! that almost always means a wrong input path.

use crate::table::record::{AreaRecord, ResultRecord};
use std::path::Path;

/// Literal token the upstream tools write for a missing numeric value.
pub const NA_TOKEN: &str = "NA";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot read table {path}: {message}")]
    Io { path: String, message: String },

    #[error("malformed table {path}: {message}")]
    Csv { path: String, message: String },

    #[error("no usable rows in {path}")]
    Empty { path: String },
}

/// Read the simulator summary table.
///
/// Expected header: arch, question, workload, l1_kB, simSeconds, simInsts,
/// numCycles, ipc, cpi, icache_miss, dcache_miss, l2_miss,
/// bp_condMispredRate, commit_branchMispredicts, outdir. Metric columns
/// absent from the header yield unavailable values rather than dropped rows.
pub fn read_results<P: AsRef<Path>>(path: P) -> Result<Vec<ResultRecord>, TableError> {
    let path_str = path.as_ref().display().to_string();

    let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|e| TableError::Io {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| TableError::Csv {
            path: path_str.clone(),
            message: e.to_string(),
        })?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let c_arch = col("arch");
    let c_question = col("question");
    let c_workload = col("workload");
    let c_l1 = col("l1_kB");
    let c_seconds = col("simSeconds");
    let c_insts = col("simInsts");
    let c_cycles = col("numCycles");
    let c_ipc = col("ipc");
    let c_cpi = col("cpi");
    let c_icache = col("icache_miss");
    let c_dcache = col("dcache_miss");
    let c_l2 = col("l2_miss");
    let c_bp_rate = col("bp_condMispredRate");
    let c_bp_count = col("commit_branchMispredicts");
    let c_outdir = col("outdir");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => continue, // malformed row, keep going
        };

        let parsed = (|| -> Result<ResultRecord, FieldError> {
            Ok(ResultRecord {
                arch: req_text(&record, c_arch)?,
                question: req_text(&record, c_question)?,
                workload: req_text(&record, c_workload)?,
                l1_kb: req_u64(&record, c_l1)? as u32,
                sim_seconds: opt_float(&record, c_seconds)?,
                sim_insts: opt_u64(&record, c_insts)?,
                num_cycles: opt_u64(&record, c_cycles)?,
                ipc: opt_float(&record, c_ipc)?,
                cpi: opt_float(&record, c_cpi)?,
                icache_miss: opt_float(&record, c_icache)?,
                dcache_miss: opt_float(&record, c_dcache)?,
                l2_miss: opt_float(&record, c_l2)?,
                bp_mispred_rate: opt_float(&record, c_bp_rate)?,
                branch_mispredicts: opt_u64(&record, c_bp_count)?,
                outdir: opt_text(&record, c_outdir),
            })
        })();

        if let Ok(row) = parsed {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(TableError::Empty { path: path_str });
    }
    Ok(rows)
}

/// Read the area summary table.
///
/// Expected header: arch, l1_kB, l1_total_mm2, l2_one_mm2, core_wo_l1_mm2,
/// total_core_l1_l2_mm2. Every area component is required; a row missing any
/// of them is dropped.
pub fn read_areas<P: AsRef<Path>>(path: P) -> Result<Vec<AreaRecord>, TableError> {
    let path_str = path.as_ref().display().to_string();

    let mut reader = csv::Reader::from_path(path.as_ref()).map_err(|e| TableError::Io {
        path: path_str.clone(),
        message: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| TableError::Csv {
            path: path_str.clone(),
            message: e.to_string(),
        })?
        .clone();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let c_arch = col("arch");
    let c_l1 = col("l1_kB");
    let c_l1_area = col("l1_total_mm2");
    let c_l2_area = col("l2_one_mm2");
    let c_core = col("core_wo_l1_mm2");
    let c_total = col("total_core_l1_l2_mm2");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(_) => continue,
        };

        let parsed = (|| -> Result<AreaRecord, FieldError> {
            Ok(AreaRecord {
                arch: req_text(&record, c_arch)?,
                l1_kb: req_u64(&record, c_l1)? as u32,
                l1_total_mm2: req_float(&record, c_l1_area)?,
                l2_one_mm2: req_float(&record, c_l2_area)?,
                core_wo_l1_mm2: req_float(&record, c_core)?,
                total_mm2: req_float(&record, c_total)?,
            })
        })();

        if let Ok(row) = parsed {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(TableError::Empty { path: path_str });
    }
    Ok(rows)
}

/// Row-local parse failure; the row is dropped, never the whole table.
struct FieldError;

fn raw<'a>(record: &'a csv::StringRecord, idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| record.get(i)).map(str::trim)
}

fn req_text(record: &csv::StringRecord, idx: Option<usize>) -> Result<String, FieldError> {
    raw(record, idx).map(str::to_string).ok_or(FieldError)
}

fn opt_text(record: &csv::StringRecord, idx: Option<usize>) -> String {
    raw(record, idx).unwrap_or("").to_string()
}

fn opt_float(record: &csv::StringRecord, idx: Option<usize>) -> Result<Option<f64>, FieldError> {
    let value = match raw(record, idx) {
        Some(v) => v,
        None => return Ok(None), // column absent from this table
    };
    if value.is_empty() || value == NA_TOKEN {
        return Ok(None);
    }
    value.parse::<f64>().map(Some).map_err(|_| FieldError)
}

fn opt_u64(record: &csv::StringRecord, idx: Option<usize>) -> Result<Option<u64>, FieldError> {
    let value = match raw(record, idx) {
        Some(v) => v,
        None => return Ok(None),
    };
    if value.is_empty() || value == NA_TOKEN {
        return Ok(None);
    }
    if let Ok(v) = value.parse::<u64>() {
        return Ok(Some(v));
    }
    // The simulator sometimes emits counters in float notation.
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Ok(Some(f as u64)),
        _ => Err(FieldError),
    }
}

fn req_float(record: &csv::StringRecord, idx: Option<usize>) -> Result<f64, FieldError> {
    opt_float(record, idx)?.ok_or(FieldError)
}

fn req_u64(record: &csv::StringRecord, idx: Option<usize>) -> Result<u64, FieldError> {
    opt_u64(record, idx)?.ok_or(FieldError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RESULT_HEADER: &str = "arch,question,workload,l1_kB,simSeconds,simInsts,numCycles,\
                                 ipc,cpi,icache_miss,dcache_miss,l2_miss,bp_condMispredRate,\
                                 commit_branchMispredicts,outdir";

    fn results_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", RESULT_HEADER).expect("write header");
        for row in rows {
            writeln!(file, "{}", row).expect("write row");
        }
        file
    }

    #[test]
    fn test_read_results_full_row() {
        let file = results_file(&[
            "a7,Q4,qsort,4,0.012,1000000,2400000,0.416667,2.4,0.01,0.02,0.3,0.05,1200,m5out/q4_a7_4",
        ]);

        let rows = read_results(file.path()).expect("read");
        assert_eq!(rows.len(), 1);

        let r = &rows[0];
        assert_eq!(r.arch, "a7");
        assert_eq!(r.l1_kb, 4);
        assert_eq!(r.num_cycles, Some(2_400_000));
        assert!((r.ipc.unwrap() - 0.416667).abs() < 1e-9);
        assert_eq!(r.outdir, "m5out/q4_a7_4");
    }

    #[test]
    fn test_na_and_empty_map_to_unavailable() {
        let file = results_file(&["a7,Q4,qsort,4,NA,,NA,0.5,NA,NA,NA,NA,NA,NA,dir"]);

        let rows = read_results(file.path()).expect("read");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sim_seconds, None);
        assert_eq!(rows[0].sim_insts, None);
        assert_eq!(rows[0].num_cycles, None);
        assert_eq!(rows[0].ipc, Some(0.5));
    }

    #[test]
    fn test_bad_row_dropped_rest_kept() {
        let file = results_file(&[
            "a7,Q4,qsort,not_a_size,NA,NA,NA,0.5,NA,NA,NA,NA,NA,NA,dir",
            "a7,Q4,qsort,4,NA,NA,NA,garbage,NA,NA,NA,NA,NA,NA,dir",
            "a7,Q4,qsort,8,NA,NA,NA,0.6,NA,NA,NA,NA,NA,NA,dir",
        ]);

        let rows = read_results(file.path()).expect("read");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].l1_kb, 8);
    }

    #[test]
    fn test_float_notation_counter() {
        let file = results_file(&["a7,Q4,qsort,4,NA,1.5e6,2400000.0,NA,NA,NA,NA,NA,NA,NA,dir"]);

        let rows = read_results(file.path()).expect("read");
        assert_eq!(rows[0].sim_insts, Some(1_500_000));
        assert_eq!(rows[0].num_cycles, Some(2_400_000));
    }

    #[test]
    fn test_zero_rows_is_error() {
        let file = results_file(&[]);
        match read_results(file.path()) {
            Err(TableError::Empty { path }) => {
                assert!(path.contains(file.path().file_name().unwrap().to_str().unwrap()));
            }
            other => panic!("expected Empty, got {:?}", other.map(|r| r.len())),
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = read_results("does/not/exist.csv");
        assert!(matches!(result, Err(TableError::Io { .. })));
    }

    #[test]
    fn test_read_areas() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "arch,l1_kB,l1_total_mm2,l2_one_mm2,core_wo_l1_mm2,total_core_l1_l2_mm2"
        )
        .expect("write header");
        writeln!(file, "a7,4,0.0512000,0.4100000,0.4500000,0.9112000").expect("write row");
        writeln!(file, "a7,8,bad,0.41,0.45,1.0").expect("write row");

        let rows = read_areas(file.path()).expect("read");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].l1_kb, 4);
        assert!((rows[0].total_mm2 - 0.9112).abs() < 1e-9);
    }
}
