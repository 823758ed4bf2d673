//! Tests for chart layout and rendering.

use mrds_common::{SamplePoint, Series, SeriesKey};
use renderer::{render_chart, Canvas, ChartLabels, ChartOptions, ChartOutcome, ChartTheme, Rgb, SkipReason};
use test_utils::{linear_points, zigzag_points};

fn key() -> SeriesKey {
    SeriesKey::new("Divisadero Mine", "500", "mean_ndvi")
}

fn series(points: Vec<SamplePoint>) -> Series {
    Series::new(key(), points)
}

fn render(series: &Series, options: &ChartOptions) -> ChartOutcome {
    render_chart(series, &ChartLabels::for_key(series.key()), options, &ChartTheme::default())
}

fn rendered(series: &Series, options: &ChartOptions) -> Canvas {
    match render(series, options) {
        ChartOutcome::Rendered(canvas) => canvas,
        ChartOutcome::Skipped(reason) => panic!("unexpected skip: {}", reason),
    }
}

fn count_color(canvas: &Canvas, color: Rgb, rows: std::ops::Range<i32>) -> usize {
    let mut n = 0;
    for y in rows {
        for x in 0..canvas.width() as i32 {
            if canvas.get(x, y) == Some(color) {
                n += 1;
            }
        }
    }
    n
}

fn plain() -> ChartOptions {
    ChartOptions { labeled: false, ..ChartOptions::default() }
}

// ============================================================================
// Degenerate input
// ============================================================================

#[test]
fn test_single_point_is_skipped() {
    let s = series(vec![SamplePoint::new(2010, 0.4)]);
    assert_eq!(render(&s, &ChartOptions::default()), ChartOutcome::Skipped(SkipReason::TooFewPoints(1)));
}

#[test]
fn test_empty_series_is_skipped() {
    let s = series(Vec::new());
    assert_eq!(render(&s, &plain()), ChartOutcome::Skipped(SkipReason::TooFewPoints(0)));
}

#[test]
fn test_constant_year_is_skipped() {
    let s = series(vec![SamplePoint::new(2010, 0.4), SamplePoint::new(2010, 0.6)]);
    assert_eq!(render(&s, &ChartOptions::default()), ChartOutcome::Skipped(SkipReason::ConstantYears));
}

#[test]
fn test_constant_value_is_skipped() {
    let s = series(linear_points(2000, 12, 0.0, 0.3));
    assert_eq!(render(&s, &ChartOptions::default()), ChartOutcome::Skipped(SkipReason::ConstantValues));
}

// ============================================================================
// Rendered output
// ============================================================================

#[test]
fn test_default_size_png() {
    let s = series(linear_points(2000, 10, 0.01, 0.2));
    let canvas = rendered(&s, &ChartOptions::default());
    let png = canvas.encode_png().unwrap();

    let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .unwrap()
        .to_rgb8();
    assert_eq!(img.dimensions(), (1100, 700));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
}

#[test]
fn test_frame_corners() {
    let theme = ChartTheme::default();
    let s = series(zigzag_points(2000, 6, 0.5, 0.1));

    let canvas = rendered(&s, &plain());
    assert_eq!(canvas.get(90, 40), Some(theme.frame));
    assert_eq!(canvas.get(1060, 40), Some(theme.frame));
    assert_eq!(canvas.get(90, 620), Some(theme.frame));
    assert_eq!(canvas.get(1060, 620), Some(theme.frame));

    // labeled ticks start on the frame and overdraw the corners they touch
    let canvas = rendered(&s, &ChartOptions::default());
    assert_eq!(canvas.get(1060, 95), Some(theme.frame));
    assert_eq!(canvas.get(130, 95), Some(theme.tick));
    assert_eq!(canvas.get(1060, 580), Some(theme.tick));
}

#[test]
fn test_series_markers_and_trend() {
    let theme = ChartTheme::default();
    let points = vec![
        SamplePoint::new(2000, 0.0),
        SamplePoint::new(2001, 1.0),
        SamplePoint::new(2002, 0.0),
        SamplePoint::new(2003, 1.0),
    ];
    let canvas = rendered(&series(points), &ChartOptions::default());

    // first point maps to (130, 547); its marker ring passes two pixels right
    assert_eq!(canvas.get(132, 547), Some(theme.marker));
    // OLS through this data is 0.2 at 2000, mapped to row 463
    assert_eq!(canvas.get(130, 463), Some(theme.trend));
    assert!(count_color(&canvas, theme.series, 95..581) > 0);
}

#[test]
fn test_labeled_variant_draws_text_and_ticks() {
    let theme = ChartTheme::default();
    let s = series(linear_points(2000, 10, 0.01, 0.2));
    let canvas = rendered(&s, &ChartOptions::default());

    // title band
    assert!(count_color(&canvas, theme.text, 20..34) > 0);
    // trend caption in the top-left corner
    assert!(count_color(&canvas, theme.trend, 30..37) > 0);
    // tick marks below the plot
    assert_eq!(canvas.get(130, 585), Some(theme.tick));
}

#[test]
fn test_plain_variant_has_no_text() {
    let theme = ChartTheme::default();
    let s = series(linear_points(2000, 10, 0.01, 0.2));
    let canvas = rendered(&s, &plain());

    assert_eq!(canvas.width(), 1100);
    assert_eq!(count_color(&canvas, theme.text, 0..700), 0);
    assert_eq!(count_color(&canvas, theme.tick, 0..700), 0);
}

#[test]
fn test_custom_canvas_size() {
    let s = series(linear_points(1990, 30, -0.02, 1.0));
    let options = ChartOptions { width: 400, height: 300, labeled: true };
    let canvas = rendered(&s, &options);
    assert_eq!((canvas.width(), canvas.height()), (400, 300));
}

#[test]
fn test_custom_theme_colors_used() {
    let theme = ChartTheme {
        trend: Rgb::new(0, 200, 0),
        ..ChartTheme::default()
    };
    let s = series(linear_points(2000, 10, 0.05, 0.2));
    let outcome = render_chart(&s, &ChartLabels::for_key(s.key()), &plain(), &theme);
    let canvas = outcome.into_canvas().unwrap();
    assert!(count_color(&canvas, Rgb::new(0, 200, 0), 40..621) > 0);
}
