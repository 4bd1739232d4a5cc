// src/chart/mod.rs
//! PNG chart rendering for comparison figures
//!
//! Consumes the gap-preserving series built by `analysis::chart_series` and
//! draws them with plotters. Series segments are drawn separately so a
//! missing value shows as a break in the line, never a fabricated point.
//! Output names are deterministic functions of the comparison group, so
//! repeated runs overwrite instead of accumulating stale files.

use crate::analysis::chart_series::{metric_series, MetricSeries};
use crate::table::{AreaRecord, GroupKey, ResultRecord};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DASHBOARD_SIZE: (u32, u32) = (1100, 700);
const CHART_SIZE: (u32, u32) = (800, 500);

/// Per-group metric dashboard: IPC, cycles, cache miss rates and branch
/// mispredict rate against L1 size, with a marker at the best
/// configuration. Returns the written path.
pub fn render_group_dashboard(
    outdir: &str,
    key: &GroupKey,
    rows: &[ResultRecord],
    best_l1: Option<u32>,
) -> Result<PathBuf, String> {
    let path = Path::new(outdir).join(format!(
        "plot_{}_{}_{}.png",
        key.question.to_lowercase(),
        key.arch,
        key.workload
    ));
    ensure_parent(&path)?;

    let mut title = key.to_string();
    if let Some(best) = best_l1 {
        title.push_str(&format!(" (best L1 = {}kB)", best));
    }

    {
        let root = BitMapBackend::new(&path, DASHBOARD_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let (header, body) = root.split_vertically(32);
        header
            .titled(&title, ("sans-serif", 22))
            .map_err(|e| e.to_string())?;

        let panels = body.split_evenly((2, 2));

        let ipc = vec![metric_series("IPC", rows, |r| r.ipc)];
        draw_panel(&panels[0], "IPC", &ipc, best_l1)?;

        let cycles = vec![metric_series("Cycles (M)", rows, |r| {
            r.num_cycles.map(|c| c as f64 / 1e6)
        })];
        draw_panel(&panels[1], "CPU cycles (millions)", &cycles, best_l1)?;

        let misses = vec![
            metric_series("L1I miss rate", rows, |r| r.icache_miss),
            metric_series("L1D miss rate", rows, |r| r.dcache_miss),
            metric_series("L2 miss rate", rows, |r| r.l2_miss),
        ];
        draw_panel(&panels[2], "Miss rate", &misses, None)?;

        let mispred = vec![metric_series("Cond mispred rate", rows, |r| {
            r.bp_mispred_rate
        })];
        draw_panel(&panels[3], "Mispred rate", &mispred, None)?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(path)
}

/// One efficiency chart per architecture, one line per workload.
/// `family` names the metric family in the file name, e.g. "power_eff".
pub fn render_efficiency_chart(
    outdir: &str,
    family: &str,
    arch: &str,
    y_desc: &str,
    series: &[MetricSeries],
) -> Result<PathBuf, String> {
    let path = Path::new(outdir).join(format!("plot_{}_{}.png", family, arch));
    ensure_parent(&path)?;

    {
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let (header, body) = root.split_vertically(32);
        header
            .titled(
                &format!("{} - {}", arch.to_uppercase(), y_desc),
                ("sans-serif", 22),
            )
            .map_err(|e| e.to_string())?;

        draw_panel(&body, y_desc, series, None)?;

        root.present().map_err(|e| e.to_string())?;
    }
    Ok(path)
}

/// Area summary figures: L1 area vs size, and total area with the delta
/// against the smallest tested L1. Returns the written paths.
pub fn render_area_charts(outdir: &str, areas: &[AreaRecord]) -> Result<Vec<PathBuf>, String> {
    let mut by_arch: BTreeMap<String, Vec<&AreaRecord>> = BTreeMap::new();
    for record in areas {
        by_arch.entry(record.arch.clone()).or_default().push(record);
    }
    for rows in by_arch.values_mut() {
        rows.sort_by_key(|r| r.l1_kb);
    }

    let series_of = |extract: &dyn Fn(&AreaRecord) -> f64| -> Vec<MetricSeries> {
        by_arch
            .iter()
            .map(|(arch, rows)| MetricSeries {
                label: arch.to_uppercase(),
                points: rows.iter().map(|&r| (r.l1_kb, Some(extract(r)))).collect(),
            })
            .collect()
    };

    let l1_path = Path::new(outdir).join("l1_area_vs_size.png");
    ensure_parent(&l1_path)?;
    {
        let root = BitMapBackend::new(&l1_path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let (header, body) = root.split_vertically(32);
        header
            .titled("L1 total area vs L1 size", ("sans-serif", 22))
            .map_err(|e| e.to_string())?;
        draw_panel(&body, "L1 total area (mm^2)", &series_of(&|r| r.l1_total_mm2), None)?;
        root.present().map_err(|e| e.to_string())?;
    }

    let total_path = Path::new(outdir).join("total_area_vs_size.png");
    {
        let root = BitMapBackend::new(&total_path, DASHBOARD_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;
        let (header, body) = root.split_vertically(32);
        header
            .titled("Total area (core + L1 + L2)", ("sans-serif", 22))
            .map_err(|e| e.to_string())?;

        let panels = body.split_evenly((1, 2));
        draw_panel(&panels[0], "Total area (mm^2)", &series_of(&|r| r.total_mm2), None)?;

        // Delta against each architecture's smallest tested L1
        let delta: Vec<MetricSeries> = by_arch
            .iter()
            .map(|(arch, rows)| {
                let base = rows.first().map(|r| r.total_mm2).unwrap_or(0.0);
                MetricSeries {
                    label: arch.to_uppercase(),
                    points: rows
                        .iter()
                        .map(|r| (r.l1_kb, Some(r.total_mm2 - base)))
                        .collect(),
                }
            })
            .collect();
        draw_panel(&panels[1], "Extra area vs smallest L1 (mm^2)", &delta, None)?;

        root.present().map_err(|e| e.to_string())?;
    }

    Ok(vec![l1_path, total_path])
}

/// Draw labeled line series with gap breaks into one drawing area.
fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    y_desc: &str,
    series: &[MetricSeries],
    marker_l1: Option<u32>,
) -> Result<(), String> {
    let (x_range, y_range) = match bounds(series, marker_l1) {
        Some(ranges) => ranges,
        None => {
            // Nothing plottable in this panel; label the hole instead of
            // inventing a curve.
            area.titled("NA", ("sans-serif", 20))
                .map_err(|e| e.to_string())?;
            return Ok(());
        }
    };

    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(x_range, y_range.clone())
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc("L1 size (kB)  (L1I=L1D)")
        .y_desc(y_desc)
        .draw()
        .map_err(|e| e.to_string())?;

    if let Some(best) = marker_l1 {
        let x = best as f64;
        chart
            .draw_series(LineSeries::new(
                vec![(x, y_range.start), (x, y_range.end)],
                RED.mix(0.5).stroke_width(1),
            ))
            .map_err(|e| e.to_string())?;
    }

    for (idx, s) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let segments = s.segments();
        for (seg_idx, segment) in segments.iter().enumerate() {
            let line = chart
                .draw_series(LineSeries::new(
                    segment.iter().map(|&(x, y)| (x as f64, y)),
                    color.stroke_width(2),
                ))
                .map_err(|e| e.to_string())?;
            if seg_idx == 0 {
                let legend_color = color;
                line.label(s.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], legend_color.stroke_width(2))
                });
            }
            chart
                .draw_series(
                    segment
                        .iter()
                        .map(|&(x, y)| Circle::new((x as f64, y), 3, color.filled())),
                )
                .map_err(|e| e.to_string())?;
        }
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Padded axis ranges over every finite point, or None when nothing is
/// plottable.
fn bounds(
    series: &[MetricSeries],
    marker_l1: Option<u32>,
) -> Option<(std::ops::Range<f64>, std::ops::Range<f64>)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;

    for s in series {
        for &(x, y) in &s.points {
            if let Some(value) = y {
                if value.is_finite() {
                    any = true;
                    min_x = min_x.min(x as f64);
                    max_x = max_x.max(x as f64);
                    min_y = min_y.min(value);
                    max_y = max_y.max(value);
                }
            }
        }
    }
    if !any {
        return None;
    }

    if let Some(marker) = marker_l1 {
        min_x = min_x.min(marker as f64);
        max_x = max_x.max(marker as f64);
    }

    let x_pad = ((max_x - min_x) * 0.05).max(0.5);
    let y_pad = ((max_y - min_y) * 0.08).max(max_y.abs() * 0.02).max(1e-9);

    Some((
        (min_x - x_pad)..(max_x + x_pad),
        (min_y - y_pad)..(max_y + y_pad),
    ))
}

fn ensure_parent(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(l1_kb: u32, ipc: Option<f64>, num_cycles: Option<u64>) -> ResultRecord {
        ResultRecord {
            arch: "a7".to_string(),
            question: "Q4".to_string(),
            workload: "qsort".to_string(),
            l1_kb,
            sim_seconds: None,
            sim_insts: None,
            num_cycles,
            ipc,
            cpi: None,
            icache_miss: Some(0.01),
            dcache_miss: Some(0.02),
            l2_miss: None,
            bp_mispred_rate: Some(0.05),
            branch_mispredicts: None,
            outdir: String::new(),
        }
    }

    #[test]
    fn test_bounds_skip_gaps() {
        let series = vec![MetricSeries {
            label: "x".to_string(),
            points: vec![(1, Some(0.5)), (2, None), (4, Some(1.5))],
        }];

        let (x_range, y_range) = bounds(&series, None).expect("bounds");
        assert!(x_range.start < 1.0 && x_range.end > 4.0);
        assert!(y_range.start < 0.5 && y_range.end > 1.5);
    }

    #[test]
    fn test_bounds_empty_series() {
        let series = vec![MetricSeries {
            label: "x".to_string(),
            points: vec![(1, None), (2, None)],
        }];
        assert!(bounds(&series, None).is_none());
    }

    #[test]
    fn test_dashboard_written_and_deterministic_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outdir = dir.path().to_str().unwrap();

        let rows = vec![
            record(1, Some(0.4), Some(1000)),
            record(2, Some(0.5), Some(800)),
            record(4, Some(0.45), None),
        ];
        let key = GroupKey::of(&rows[0]);

        let path = render_group_dashboard(outdir, &key, &rows, Some(2)).expect("render");
        assert_eq!(path.file_name().unwrap(), "plot_q4_a7_qsort.png");
        assert!(path.metadata().expect("written").len() > 0);

        // Rerun overwrites the same file
        let again = render_group_dashboard(outdir, &key, &rows, Some(2)).expect("render");
        assert_eq!(path, again);
    }

    #[test]
    fn test_efficiency_chart_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outdir = dir.path().to_str().unwrap();

        let series = vec![MetricSeries {
            label: "qsort".to_string(),
            points: vec![(4, Some(0.0040)), (8, Some(0.0055))],
        }];

        let path = render_efficiency_chart(
            outdir,
            "power_eff",
            "a7",
            "Energy efficiency (IPC / mW)",
            &series,
        )
        .expect("render");
        assert_eq!(path.file_name().unwrap(), "plot_power_eff_a7.png");
        assert!(path.metadata().expect("written").len() > 0);
    }

    #[test]
    fn test_area_charts_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let outdir = dir.path().to_str().unwrap();

        let areas = vec![
            AreaRecord {
                arch: "a7".to_string(),
                l1_kb: 1,
                l1_total_mm2: 0.02,
                l2_one_mm2: 0.41,
                core_wo_l1_mm2: 0.45,
                total_mm2: 0.88,
            },
            AreaRecord {
                arch: "a7".to_string(),
                l1_kb: 4,
                l1_total_mm2: 0.05,
                l2_one_mm2: 0.41,
                core_wo_l1_mm2: 0.45,
                total_mm2: 0.91,
            },
        ];

        let paths = render_area_charts(outdir, &areas).expect("render");
        assert_eq!(paths.len(), 2);
        for path in paths {
            assert!(path.metadata().expect("written").len() > 0);
        }
    }
}
