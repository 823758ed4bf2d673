//! MRDS report tool.
//!
//! `trends` turns a long-form yearly export into clean and trend summary
//! tables; `plot` renders one PNG line chart per (site, buffer, metric)
//! group of a clean table and writes a manifest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mrds_common::parse_metric_list;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use mrds_report::{run_plot, run_trends, ReportConfig};

#[derive(Parser, Debug)]
#[command(name = "mrds-report")]
#[command(about = "Trend tables and PNG charts for MRDS yearly metric exports")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute site/buffer trend summaries from an export CSV
    Trends(TrendsArgs),
    /// Generate PNG trend charts from a clean CSV
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
struct TrendsArgs {
    /// Input long-form CSV export
    #[arg(long)]
    input: PathBuf,

    /// Summary CSV path (default: <input>_trend_summary.csv)
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Clean CSV path (default: <input>_clean.csv)
    #[arg(long)]
    clean_out: Option<PathBuf>,

    /// Minimum data points before slopes are reported
    #[arg(long)]
    min_years: Option<usize>,

    /// Comma-separated metric columns
    #[arg(long)]
    metrics: Option<String>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Clean CSV from the trends command
    #[arg(long)]
    input_clean: PathBuf,

    /// Output directory for PNGs and the manifest
    #[arg(long)]
    outdir: PathBuf,

    /// Comma-separated metric columns
    #[arg(long)]
    metrics: Option<String>,

    /// Omit tick labels, titles and the trend caption
    #[arg(long)]
    plain: bool,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Render groups in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if cli.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    // Load configuration
    let mut config = ReportConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Trends(args) => {
            if let Some(min_years) = args.min_years {
                config.min_years = min_years;
            }
            if let Some(metrics) = &args.metrics {
                config.metrics = parse_metric_list(metrics);
            }
            info!(input = %args.input.display(), metrics = config.metrics.len(), "Computing trends");

            let report = run_trends(
                &args.input,
                args.clean_out.as_deref(),
                args.summary_out.as_deref(),
                &config,
            )
            .with_context(|| format!("Trend run failed for {}", args.input.display()))?;

            println!("Input rows: {}", report.input_rows);
            println!("Clean rows written: {} -> {}", report.clean_rows, report.clean_out.display());
            println!(
                "Trend summary rows written: {} -> {}",
                report.summary_rows,
                report.summary_out.display()
            );
        }
        Command::Plot(args) => {
            if let Some(metrics) = &args.metrics {
                config.metrics = parse_metric_list(metrics);
            }
            if let Some(width) = args.width {
                config.canvas.width = width;
            }
            if let Some(height) = args.height {
                config.canvas.height = height;
            }
            if args.plain {
                config.labeled = false;
            }
            if args.parallel {
                config.parallel = true;
            }
            info!(input = %args.input_clean.display(), outdir = %args.outdir.display(), "Generating charts");

            let report = run_plot(&args.input_clean, &args.outdir, &config)
                .with_context(|| format!("Plot run failed for {}", args.input_clean.display()))?;

            println!("Generated PNG files: {}", report.written().count());
            println!("Manifest: {}", report.manifest_path.display());
        }
    }

    Ok(())
}
