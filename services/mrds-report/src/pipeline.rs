//! Per-group batch pipeline for the `trends` and `plot` commands.
//!
//! Groups are independent: each one is summarized or rendered and
//! written on its own, so the plot step can map them over a rayon pool
//! when `parallel` is set. Output order is always group key order.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use mrds_common::{chart_filename, MrdsError, MrdsResult, Series, SeriesKey};
use rayon::prelude::*;
use renderer::{render_chart, ChartLabels, ChartOutcome, PlotArea, SkipReason};
use serde::Serialize;
use tracing::{debug, info};
use trends::{clean_rows, group_series, summarize_clean_rows};

use crate::config::ReportConfig;
use crate::io::{read_table, sibling_path, write_clean_table, write_records};

pub const MANIFEST_FILE: &str = "manifest.csv";

pub const MANIFEST_HEADER: [&str; 5] = ["site_name", "buffer_m", "metric", "n_points", "png_file"];

pub const SUMMARY_HEADER: [&str; 15] = [
    "site_name",
    "buffer_m",
    "metric",
    "n_years",
    "start_year",
    "end_year",
    "start_value",
    "end_value",
    "abs_change",
    "pct_change",
    "ols_slope_per_year",
    "ols_intercept",
    "theil_sen_slope_per_year",
    "direction_ols",
    "direction_theil_sen",
];

/// What the `trends` command produced.
#[derive(Debug, Clone)]
pub struct TrendsReport {
    pub input_rows: usize,
    pub clean_rows: usize,
    pub summary_rows: usize,
    pub clean_out: PathBuf,
    pub summary_out: PathBuf,
}

/// Clean an export table and write the clean and summary tables.
///
/// Output paths default to `<input>_clean.csv` and
/// `<input>_trend_summary.csv` next to the input.
pub fn run_trends(
    input: &Path,
    clean_out: Option<&Path>,
    summary_out: Option<&Path>,
    config: &ReportConfig,
) -> MrdsResult<TrendsReport> {
    config.validate()?;
    let clean_out = clean_out.map_or_else(|| sibling_path(input, "_clean.csv"), Path::to_path_buf);
    let summary_out =
        summary_out.map_or_else(|| sibling_path(input, "_trend_summary.csv"), Path::to_path_buf);

    let table = read_table(input)?;
    let cleaned = clean_rows(&table.rows, &config.metrics);
    let summary = summarize_clean_rows(&cleaned, &config.metrics, &config.trend_config());

    write_clean_table(&clean_out, &cleaned, &config.metrics)?;
    write_records(&summary_out, &SUMMARY_HEADER, &summary)?;

    let report = TrendsReport {
        input_rows: table.rows.len(),
        clean_rows: cleaned.len(),
        summary_rows: summary.len(),
        clean_out,
        summary_out,
    };
    info!(
        input_rows = report.input_rows,
        clean_rows = report.clean_rows,
        summary_rows = report.summary_rows,
        clean_out = %report.clean_out.display(),
        summary_out = %report.summary_out.display(),
        "Wrote trend tables"
    );
    Ok(report)
}

/// One manifest row: a chart that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub site_name: String,
    pub buffer_m: String,
    pub metric: String,
    pub n_points: usize,
    pub png_file: String,
}

/// Result of processing one (site, buffer, metric) group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOutcome {
    Written(ManifestEntry),
    Skipped { key: SeriesKey, reason: SkipReason },
}

/// What the `plot` command produced.
#[derive(Debug, Clone)]
pub struct PlotReport {
    pub outcomes: Vec<GroupOutcome>,
    pub manifest_path: PathBuf,
}

impl PlotReport {
    pub fn written(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.outcomes.iter().filter_map(|o| match o {
            GroupOutcome::Written(entry) => Some(entry),
            GroupOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GroupOutcome::Skipped { .. }))
            .count()
    }
}

/// Render every group of a clean table into `outdir` and write the manifest.
pub fn run_plot(input_clean: &Path, outdir: &Path, config: &ReportConfig) -> MrdsResult<PlotReport> {
    config.validate()?;
    let table = read_table(input_clean)?;
    let series = group_series(&table.rows, &config.metrics);
    check_unique_filenames(&series, config)?;

    fs::create_dir_all(outdir)
        .map_err(|e| MrdsError::OutputWriteError(format!("{}: {}", outdir.display(), e)))?;

    let outcomes: Vec<GroupOutcome> = if config.parallel {
        series
            .par_iter()
            .map(|s| render_group(s, outdir, config))
            .collect::<MrdsResult<_>>()?
    } else {
        series
            .iter()
            .map(|s| render_group(s, outdir, config))
            .collect::<MrdsResult<_>>()?
    };

    let report = PlotReport {
        outcomes,
        manifest_path: outdir.join(MANIFEST_FILE),
    };
    let entries: Vec<&ManifestEntry> = report.written().collect();
    write_records(&report.manifest_path, &MANIFEST_HEADER, &entries)?;

    info!(
        groups = report.outcomes.len(),
        written = entries.len(),
        skipped = report.skipped(),
        manifest = %report.manifest_path.display(),
        "Generated charts"
    );
    Ok(report)
}

/// Fail if two drawable groups would write the same chart file.
///
/// Distinct keys can slug to one name (`Mine #1` and `Mine 1`); writing
/// both would drop a chart, and in parallel mode which one survives
/// would depend on scheduling.
pub fn check_unique_filenames(series: &[Series], config: &ReportConfig) -> MrdsResult<()> {
    let options = config.chart_options();
    let mut seen: HashMap<String, &SeriesKey> = HashMap::new();
    for s in series {
        if PlotArea::for_series(s, &options).is_err() {
            continue;
        }
        let name = chart_filename(s.key());
        if let Some(first) = seen.get(&name) {
            return Err(MrdsError::DuplicateOutput(format!(
                "{} (groups {} and {})",
                name,
                first,
                s.key()
            )));
        }
        seen.insert(name, s.key());
    }
    Ok(())
}

/// Render one series and write its PNG.
pub fn render_group(series: &Series, outdir: &Path, config: &ReportConfig) -> MrdsResult<GroupOutcome> {
    let key = series.key();
    let labels = ChartLabels::for_key(key);
    let canvas = match render_chart(series, &labels, &config.chart_options(), &config.theme) {
        ChartOutcome::Rendered(canvas) => canvas,
        ChartOutcome::Skipped(reason) => {
            return Ok(GroupOutcome::Skipped {
                key: key.clone(),
                reason,
            })
        }
    };

    let png = canvas.encode_png()?;
    let path = outdir.join(chart_filename(key));
    fs::write(&path, &png)
        .map_err(|e| MrdsError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    debug!(key = %key, path = %path.display(), bytes = png.len(), "Wrote chart");

    Ok(GroupOutcome::Written(ManifestEntry {
        site_name: key.site.clone(),
        buffer_m: key.buffer.clone(),
        metric: key.metric.clone(),
        n_points: series.len(),
        png_file: path.display().to_string(),
    }))
}
