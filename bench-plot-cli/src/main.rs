//! Benchmark Plot CLI Application
//!
//! This is the command-line interface for the benchmark report plotter.
//! It uses the bench-report-parser library and adds:
//! - Report file discovery per platform
//! - TOML chart configuration (regions, colors, layout)
//! - Chart rendering (SVG/PNG)
//! - JSON export of the aggregated tables

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod chart;
mod config;
mod export;

use bench_report_parser::{discover_reports, ReportLoader};

/// Benchmark Plot - parse MPP timing reports and plot runtime scaling
#[derive(Parser, Debug)]
#[command(name = "bench-plot-cli")]
#[command(about = "Plot per-module runtime scaling from benchmark timing reports", long_about = None)]
#[command(version)]
struct Args {
    /// Directory containing the report files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Platform to plot (can be repeated; default: configured platforms)
    #[arg(short, long, value_name = "NAME")]
    platform: Vec<String>,

    /// Path to chart configuration file (plot.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image file (.svg or .png)
    #[arg(short, long, value_name = "FILE", default_value = "runtime_per_step.svg")]
    output: PathBuf,

    /// Also export the aggregated tables as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Benchmark Plot CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using parser library v{}", bench_report_parser::VERSION);

    // Load chart configuration (defaults reproduce the MOM6 module grid)
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::AppConfig::default(),
    };

    // --platform narrows the configured platform list
    let platforms: Vec<String> = if args.platform.is_empty() {
        config.platform_names()
    } else {
        args.platform.clone()
    };

    println!("═══════════════════════════════════════════════");
    println!("  Benchmark Report Plotter");
    println!("═══════════════════════════════════════════════\n");

    // Discover and ingest reports per platform
    let mut loader = ReportLoader::new();
    for platform in &platforms {
        let files = discover_reports(&args.data_dir, platform)
            .with_context(|| format!("Failed to scan {:?} for {:?} reports", args.data_dir, platform))?;

        if files.is_empty() {
            log::warn!("No report files found for platform {:?}", platform);
            continue;
        }

        let count = loader
            .add_report_files(platform, &files)
            .with_context(|| format!("Failed to load reports for platform {:?}", platform))?;
        println!("Loaded {} report(s) for {}", count, platform);
    }

    // Show aggregation stats
    let stats = loader.stats();
    println!("\n📊 Aggregated tables:");
    println!("  Platforms: {}", stats.num_platforms);
    println!("  Regions:   {}", stats.num_regions);
    println!("  Samples:   {}", stats.num_samples);

    // Optional machine-readable dump
    if let Some(json_path) = &args.json {
        export::write_json(&loader, json_path)?;
        println!("\n✓ Tables exported to {:?}", json_path);
    }

    if stats.num_samples == 0 {
        println!("\nNo timing data found - nothing to plot.");
        println!("Expected files like cpu_0064x.out or gpu/0064x.out under {:?}", args.data_dir);
        return Ok(());
    }

    // Render the chart grid
    chart::render(&loader, &config, &platforms, &args.output)
        .with_context(|| format!("Failed to render chart to {:?}", args.output))?;
    println!("\n✓ Chart written to {:?}", args.output);

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
