//! Per-series trend summaries.

use mrds_common::{SamplePoint, Series, SeriesKey};
use serde::{Deserialize, Serialize};

use crate::ingest::{group_site_buffer, CleanRow};
use crate::stats::{classify_direction, ols_fit, theil_sen_slope, Direction, DEFAULT_DIRECTION_EPS};

/// Default number of points required before slopes are reported.
pub const DEFAULT_MIN_YEARS: usize = 8;

/// Tunables for slope reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Slopes are only computed for series at least this long.
    pub min_years: usize,
    /// Slopes within `±direction_eps` are classified flat.
    pub direction_eps: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_years: DEFAULT_MIN_YEARS,
            direction_eps: DEFAULT_DIRECTION_EPS,
        }
    }
}

/// Trend statistics for one (site, buffer, metric) series.
///
/// Field order is the column order of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    pub site_name: String,
    pub buffer_m: String,
    pub metric: String,
    pub n_years: usize,
    pub start_year: Option<i64>,
    pub end_year: Option<i64>,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
    pub abs_change: Option<f64>,
    pub pct_change: Option<f64>,
    pub ols_slope_per_year: Option<f64>,
    pub ols_intercept: Option<f64>,
    pub theil_sen_slope_per_year: Option<f64>,
    pub direction_ols: Direction,
    pub direction_theil_sen: Direction,
}

/// Compute the trend result for a series.
///
/// Descriptive fields are filled whenever the series has a point; the
/// slope estimators only run once it reaches `config.min_years` points.
pub fn summarize(series: &Series, config: &TrendConfig) -> TrendResult {
    let key = series.key();
    let first = series.first();
    let last = series.last();

    let abs_change = match (first, last) {
        (Some(a), Some(b)) => Some(b.y - a.y),
        _ => None,
    };
    let pct_change = match (first, last) {
        (Some(a), Some(b)) if a.y != 0.0 => Some((b.y - a.y) / a.y.abs() * 100.0),
        _ => None,
    };

    let gated = series.len() >= config.min_years;
    let fit = if gated { ols_fit(series.points()) } else { None };
    let theil_sen = if gated { theil_sen_slope(series.points()) } else { None };
    let ols_slope = fit.map(|f| f.slope);

    TrendResult {
        site_name: key.site.clone(),
        buffer_m: key.buffer.clone(),
        metric: key.metric.clone(),
        n_years: series.len(),
        start_year: first.map(|p| p.x),
        end_year: last.map(|p| p.x),
        start_value: first.map(|p| p.y),
        end_value: last.map(|p| p.y),
        abs_change,
        pct_change,
        ols_slope_per_year: ols_slope,
        ols_intercept: fit.map(|f| f.intercept),
        theil_sen_slope_per_year: theil_sen,
        direction_ols: classify_direction(ols_slope, config.direction_eps),
        direction_theil_sen: classify_direction(theil_sen, config.direction_eps),
    }
}

/// Summaries for every (site, buffer) group × configured metric.
///
/// Groups come out in key order and metrics in configured order. A metric
/// with no values in a group still yields a row with `n_years = 0`.
pub fn summarize_clean_rows(
    rows: &[CleanRow],
    metrics: &[String],
    config: &TrendConfig,
) -> Vec<TrendResult> {
    let mut results = Vec::new();
    for ((site, buffer), group) in group_site_buffer(rows) {
        for (idx, metric) in metrics.iter().enumerate() {
            let points: Vec<SamplePoint> = group
                .iter()
                .filter_map(|row| {
                    let value = row.values.get(idx).copied().flatten()?;
                    Some(SamplePoint::new(row.year, value))
                })
                .collect();
            let series = Series::new(SeriesKey::new(site.as_str(), buffer.as_str(), metric.as_str()), points);
            results.push(summarize(&series, config));
        }
    }
    tracing::debug!(rows = results.len(), "Computed trend summaries");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, f64)]) -> Series {
        Series::new(
            SeriesKey::new("Mine A", "500", "mean_ndvi"),
            points.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect(),
        )
    }

    #[test]
    fn test_empty_series() {
        let result = summarize(&series(&[]), &TrendConfig::default());
        assert_eq!(result.n_years, 0);
        assert_eq!(result.start_year, None);
        assert_eq!(result.abs_change, None);
        assert_eq!(result.pct_change, None);
        assert_eq!(result.direction_ols, Direction::InsufficientData);
        assert_eq!(result.direction_theil_sen, Direction::InsufficientData);
    }

    #[test]
    fn test_gate_keeps_descriptive_fields() {
        let result = summarize(&series(&[(2013, 2.0), (2014, 3.0), (2015, 5.0)]), &TrendConfig::default());
        assert_eq!(result.n_years, 3);
        assert_eq!(result.start_year, Some(2013));
        assert_eq!(result.end_year, Some(2015));
        assert_eq!(result.abs_change, Some(3.0));
        assert_eq!(result.pct_change, Some(150.0));
        assert_eq!(result.ols_slope_per_year, None);
        assert_eq!(result.theil_sen_slope_per_year, None);
        assert_eq!(result.direction_ols, Direction::InsufficientData);
    }

    #[test]
    fn test_gate_lowered() {
        let config = TrendConfig {
            min_years: 2,
            ..TrendConfig::default()
        };
        let result = summarize(&series(&[(2013, 2.0), (2015, 1.0)]), &config);
        assert_eq!(result.ols_slope_per_year, Some(-0.5));
        assert_eq!(result.theil_sen_slope_per_year, Some(-0.5));
        assert_eq!(result.direction_ols, Direction::Decreasing);
    }

    #[test]
    fn test_pct_change_zero_start() {
        let result = summarize(&series(&[(2013, 0.0), (2014, 3.0)]), &TrendConfig::default());
        assert_eq!(result.abs_change, Some(3.0));
        assert_eq!(result.pct_change, None);
    }

    #[test]
    fn test_pct_change_negative_start() {
        let result = summarize(&series(&[(2013, -2.0), (2014, -1.0)]), &TrendConfig::default());
        assert_eq!(result.pct_change, Some(50.0));
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let config = TrendConfig {
            min_years: 2,
            ..TrendConfig::default()
        };
        let result = summarize(&series(&[(i64::MIN, 0.0), (i64::MAX, 1.0)]), &config);
        assert_eq!(result.n_years, 2);
        assert!(result.theil_sen_slope_per_year.unwrap() > 0.0);
        assert_eq!(result.direction_theil_sen, Direction::Flat);
        assert_eq!(result.direction_ols, Direction::Flat);
    }
}
