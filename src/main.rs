// src/main.rs
//! Benchmark report CLI
//! Turns simulator and area summaries into efficiency tables and figures

use clap::{Arg, ArgMatches, Command};
use std::path::Path;

use bench_report::analysis::{
    area_efficiency, best_per_group, efficiency_series_by_arch, group_records, power_efficiency,
    write_best_config_report, write_efficiency_report, AreaIndex, Normalizer,
};
use bench_report::chart;
use bench_report::config::AnalysisConfig;
use bench_report::table::{read_areas, read_results};

fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("power-eff", sub_matches)) => cmd_power_eff(sub_matches),
        Some(("area-eff", sub_matches)) => cmd_area_eff(sub_matches),
        Some(("metrics", sub_matches)) => cmd_metrics(sub_matches),
        Some(("area-report", sub_matches)) => cmd_area_report(sub_matches),
        Some(("config-gen", sub_matches)) => cmd_config_gen(sub_matches),
        _ => {
            println!("bench-report v0.1");
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn cli() -> Command {
    let results_arg = Arg::new("results")
        .short('r')
        .long("results")
        .value_name("FILE")
        .help("Simulator summary CSV")
        .default_value("results/summary.csv");
    let config_arg = Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Analysis configuration (TOML); built-in study defaults if absent")
        .default_value("config/analysis.toml");
    let area_arg = Arg::new("area")
        .short('a')
        .long("area")
        .value_name("FILE")
        .help("Area summary CSV")
        .default_value("results/area_summary.csv");

    Command::new("bench-report")
        .version("0.1.0")
        .about("Efficiency analysis of cache-size sweep benchmark results")
        .subcommand(
            Command::new("power-eff")
                .about("Energy efficiency table and charts (IPC / mW)")
                .arg(results_arg.clone())
                .arg(config_arg.clone())
                .arg(
                    Arg::new("outdir")
                        .short('o')
                        .long("outdir")
                        .value_name("DIR")
                        .help("Output directory")
                        .default_value("reports/power_eff"),
                ),
        )
        .subcommand(
            Command::new("area-eff")
                .about("Surface efficiency table and charts (IPC / mm^2)")
                .arg(results_arg.clone())
                .arg(area_arg.clone())
                .arg(config_arg.clone())
                .arg(
                    Arg::new("outdir")
                        .short('o')
                        .long("outdir")
                        .value_name("DIR")
                        .help("Output directory")
                        .default_value("reports/area_eff"),
                ),
        )
        .subcommand(
            Command::new("metrics")
                .about("Per-group metric dashboards and best-configuration summary")
                .arg(results_arg.clone())
                .arg(
                    Arg::new("outdir")
                        .short('o')
                        .long("outdir")
                        .value_name("DIR")
                        .help("Output directory")
                        .default_value("reports/metrics"),
                ),
        )
        .subcommand(
            Command::new("area-report")
                .about("Area summary charts")
                .arg(area_arg.clone())
                .arg(
                    Arg::new("outdir")
                        .short('o')
                        .long("outdir")
                        .value_name("DIR")
                        .help("Output directory")
                        .default_value("reports/area"),
                ),
        )
        .subcommand(
            Command::new("config-gen")
                .about("Generate the default analysis configuration file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Output file path")
                        .default_value("config/analysis.toml"),
                ),
        )
}

/// Load the analysis configuration, falling back to the built-in study
/// defaults when no file exists at the configured path.
fn load_config(matches: &ArgMatches) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let config_path = matches.get_one::<String>("config").expect("defaulted");
    if Path::new(config_path).exists() {
        Ok(AnalysisConfig::from_file(config_path)?)
    } else {
        Ok(AnalysisConfig::default_study())
    }
}

fn cmd_power_eff(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let results_path = matches.get_one::<String>("results").expect("defaulted");
    let outdir = matches.get_one::<String>("outdir").expect("defaulted");
    let config = load_config(matches)?;

    let records = read_results(results_path)?;
    println!("✓ {} result rows from {}", records.len(), results_path);

    let efficiency = power_efficiency(&records, &config);
    println!("  {} rows pass the selection predicate", efficiency.len());

    let out_csv = Path::new(outdir).join("power_eff_summary.csv");
    write_efficiency_report(&efficiency, Normalizer::Power, &out_csv)?;
    println!("✓ Report written to {}", out_csv.display());

    for (arch, series) in efficiency_series_by_arch(&efficiency) {
        let path = chart::render_efficiency_chart(
            outdir,
            "power_eff",
            &arch,
            "Energy efficiency (IPC / mW)",
            &series,
        )?;
        println!("  {}", path.display());
    }

    Ok(())
}

fn cmd_area_eff(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let results_path = matches.get_one::<String>("results").expect("defaulted");
    let area_path = matches.get_one::<String>("area").expect("defaulted");
    let outdir = matches.get_one::<String>("outdir").expect("defaulted");
    let config = load_config(matches)?;

    let records = read_results(results_path)?;
    println!("✓ {} result rows from {}", records.len(), results_path);

    let areas = AreaIndex::from_records(read_areas(area_path)?);
    println!("✓ {} area records from {}", areas.len(), area_path);

    let efficiency = area_efficiency(&records, &areas, &config);
    println!("  {} rows joined against the area table", efficiency.len());

    let out_csv = Path::new(outdir).join("area_eff_summary.csv");
    write_efficiency_report(&efficiency, Normalizer::Area, &out_csv)?;
    println!("✓ Report written to {}", out_csv.display());

    for (arch, series) in efficiency_series_by_arch(&efficiency) {
        let path = chart::render_efficiency_chart(
            outdir,
            "area_eff",
            &arch,
            "Surface efficiency (IPC / mm^2)",
            &series,
        )?;
        println!("  {}", path.display());
    }

    Ok(())
}

fn cmd_metrics(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let results_path = matches.get_one::<String>("results").expect("defaulted");
    let outdir = matches.get_one::<String>("outdir").expect("defaulted");

    let records = read_results(results_path)?;
    println!("✓ {} result rows from {}", records.len(), results_path);

    let groups = group_records(&records);
    let best = best_per_group(&groups);

    let out_csv = Path::new(outdir).join("best_config_summary.csv");
    write_best_config_report(&best, &out_csv)?;
    println!("✓ Best-configuration summary written to {}", out_csv.display());

    println!("Wrote dashboards:");
    for ((key, rows), (_, best_l1)) in groups.iter().zip(best.iter()) {
        let path = chart::render_group_dashboard(outdir, key, rows, *best_l1)?;
        println!("  {}", path.display());
    }

    Ok(())
}

fn cmd_area_report(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let area_path = matches.get_one::<String>("area").expect("defaulted");
    let outdir = matches.get_one::<String>("outdir").expect("defaulted");

    let areas = read_areas(area_path)?;
    println!("✓ {} area records from {}", areas.len(), area_path);

    println!("Wrote charts:");
    for path in chart::render_area_charts(outdir, &areas)? {
        println!("  {}", path.display());
    }

    Ok(())
}

fn cmd_config_gen(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = matches.get_one::<String>("output").expect("defaulted");

    let config = AnalysisConfig::default_study();

    // Create directory if it doesn't exist
    if let Some(parent) = Path::new(output_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    config.save_to_file(output_path)?;

    println!("✓ Configuration saved to {}", output_path);
    println!("  Edit power_mw / selections to change the comparison");

    Ok(())
}
