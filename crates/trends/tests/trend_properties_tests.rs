//! Property tests for the trend statistics engine.
//!
//! Uses synthetic series with known slopes to check the estimators,
//! the min-years gate, and direction classification end to end.

use mrds_common::{Series, SeriesKey, TableRow};
use test_utils::{assert_approx_eq, assert_some_approx_eq, export_row, linear_points, ndvi_rows, stepped_points, zigzag_points};
use trends::ingest::clean_rows;
use trends::{ols_fit, summarize, summarize_clean_rows, theil_sen_slope, Direction, TrendConfig};

fn metrics() -> Vec<String> {
    vec!["mean_ndvi".to_string(), "bare_pct".to_string()]
}

// ============================================================================
// Estimator properties
// ============================================================================

#[test]
fn test_ols_recovers_linear_slope() {
    for &(slope, intercept) in &[(0.37, -12.5), (-2.0, 4100.0), (0.0001, 0.3)] {
        let points = linear_points(1990, 21, slope, intercept);
        let fit = ols_fit(&points).expect("fit exists");
        assert_approx_eq!(fit.slope, slope, 1e-9);

        let residual_sum: f64 = points.iter().map(|p| p.y - fit.at(p.x as f64)).sum();
        assert_approx_eq!(residual_sum, 0.0, 1e-6);
    }
}

#[test]
fn test_theil_sen_exact_on_linear_series() {
    // dyadic slope and intercept keep every value exactly representable
    let points = linear_points(2000, 12, 0.25, 10.0);
    assert_eq!(theil_sen_slope(&points), Some(0.25));

    let points = linear_points(1984, 9, -3.0, 6000.0);
    assert_eq!(theil_sen_slope(&points), Some(-3.0));
}

#[test]
fn test_theil_sen_matches_ols_for_two_points() {
    let points = vec![
        mrds_common::SamplePoint::new(2013, 0.412),
        mrds_common::SamplePoint::new(2019, 0.377),
    ];
    let ols = ols_fit(&points).unwrap().slope;
    let ts = theil_sen_slope(&points).unwrap();
    assert_approx_eq!(ts, ols, 1e-12);
}

#[test]
fn test_zigzag_is_flat() {
    let series = Series::new(
        SeriesKey::new("Mine A", "500", "mean_ndvi"),
        zigzag_points(2000, 10, 0.5, 0.01),
    );
    let result = summarize(&series, &TrendConfig::default());
    assert_eq!(result.direction_theil_sen, Direction::Flat);
}

// ============================================================================
// Summaries from rows
// ============================================================================

#[test]
fn test_increasing_series_end_to_end() {
    let rows = ndvi_rows("Mine A", "500", &stepped_points(2013, 10, 0.30, 0.01));
    let cleaned = clean_rows(&rows, &metrics());
    let results = summarize_clean_rows(&cleaned, &metrics(), &TrendConfig::default());

    assert_eq!(results.len(), 2);
    let ndvi = &results[0];
    assert_eq!(ndvi.metric, "mean_ndvi");
    assert_eq!(ndvi.n_years, 10);
    assert_eq!(ndvi.start_year, Some(2013));
    assert_eq!(ndvi.end_year, Some(2022));
    assert_some_approx_eq!(ndvi.ols_slope_per_year, 0.01, 1e-9);
    assert_some_approx_eq!(ndvi.theil_sen_slope_per_year, 0.01, 1e-9);
    assert_some_approx_eq!(ndvi.abs_change, 0.09, 1e-9);
    assert_some_approx_eq!(ndvi.pct_change, 30.0, 1e-6);
    assert_eq!(ndvi.direction_ols, Direction::Increasing);
    assert_eq!(ndvi.direction_theil_sen, Direction::Increasing);

    // bare_pct has no values: the row still exists
    let bare = &results[1];
    assert_eq!(bare.metric, "bare_pct");
    assert_eq!(bare.n_years, 0);
    assert_eq!(bare.direction_ols, Direction::InsufficientData);
}

#[test]
fn test_short_series_is_gated() {
    let rows = ndvi_rows("Mine A", "500", &stepped_points(2013, 7, 0.30, 0.01));
    let cleaned = clean_rows(&rows, &metrics());
    let results = summarize_clean_rows(&cleaned, &metrics(), &TrendConfig::default());

    let ndvi = &results[0];
    assert_eq!(ndvi.n_years, 7);
    assert_eq!(ndvi.ols_slope_per_year, None);
    assert_eq!(ndvi.theil_sen_slope_per_year, None);
    assert_eq!(ndvi.direction_ols, Direction::InsufficientData);
    assert_some_approx_eq!(ndvi.abs_change, 0.06, 1e-9);
}

#[test]
fn test_groups_are_ordered() {
    let mut rows: Vec<TableRow> = Vec::new();
    rows.extend(ndvi_rows("Zeta", "100", &stepped_points(2013, 3, 0.1, 0.1)));
    rows.extend(ndvi_rows("Alpha", "500", &stepped_points(2013, 3, 0.1, 0.1)));
    rows.extend(ndvi_rows("Alpha", "1000", &stepped_points(2013, 3, 0.1, 0.1)));
    rows.push(export_row("", "500", 2013, Some(1.0), None));

    let cleaned = clean_rows(&rows, &metrics());
    assert_eq!(cleaned.len(), 9);

    let results = summarize_clean_rows(&cleaned, &metrics(), &TrendConfig::default());
    let order: Vec<(&str, &str, &str)> = results
        .iter()
        .map(|r| (r.site_name.as_str(), r.buffer_m.as_str(), r.metric.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Alpha", "1000", "mean_ndvi"),
            ("Alpha", "1000", "bare_pct"),
            ("Alpha", "500", "mean_ndvi"),
            ("Alpha", "500", "bare_pct"),
            ("Zeta", "100", "mean_ndvi"),
            ("Zeta", "100", "bare_pct"),
        ]
    );
}

#[test]
fn test_summary_serializes_to_csv() {
    let rows = ndvi_rows("Mine A", "500", &stepped_points(2013, 2, 0.5, 0.25));
    let cleaned = clean_rows(&rows, &metrics());
    let config = TrendConfig {
        min_years: 2,
        ..TrendConfig::default()
    };
    let results = summarize_clean_rows(&cleaned, &metrics(), &config);

    let mut writer = csv::Writer::from_writer(Vec::new());
    for result in &results {
        writer.serialize(result).unwrap();
    }
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("site_name,buffer_m,metric,n_years,start_year,end_year,start_value,end_value,abs_change,pct_change,ols_slope_per_year,ols_intercept,theil_sen_slope_per_year,direction_ols,direction_theil_sen")
    );
    let ndvi = lines.next().unwrap();
    assert!(ndvi.starts_with("Mine A,500,mean_ndvi,2,2013,2014,0.5,0.75,0.25,50.0,0.25,"));
    assert!(ndvi.ends_with(",0.25,increasing,increasing"));
    assert_eq!(
        lines.next(),
        Some("Mine A,500,bare_pct,0,,,,,,,,,,insufficient_data,insufficient_data")
    );
}
