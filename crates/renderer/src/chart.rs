//! Line-chart layout for one yearly series.
//!
//! Maps a series into a fixed plot rectangle, draws gridlines, frame,
//! the series with point markers and an OLS trend line, and, for the
//! labeled variant, tick labels, title, axis labels and a trend caption.
//!
//! Pixel mapping truncates toward zero, like the gridline and tick
//! placement; sub-pixel precision near the plot edges is not kept.

use mrds_common::{metric_label, MrdsError, MrdsResult, Series, SeriesKey};
use trends::ols_fit;

use crate::canvas::Canvas;
use crate::font::{safe_label_text, text_width};
use crate::style::ChartTheme;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: usize = 1100;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: usize = 700;

/// Fraction of the value range added above and below the data.
const VALUE_PADDING: f64 = 0.08;

/// Horizontal gridline / value tick divisions.
const VALUE_DIVISIONS: i32 = 6;

const TICK_LENGTH: i32 = 8;
const MARKER_RADIUS: i32 = 2;
const TREND_CAPTION: &str = "TREND LINE = OLS";

/// Space reserved around the plot rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Insets {
    /// Margins for charts with tick labels and titles.
    pub const LABELED: Insets = Insets { left: 130, right: 40, top: 95, bottom: 120 };

    /// Margins for bare charts.
    pub const PLAIN: Insets = Insets { left: 90, right: 40, top: 40, bottom: 80 };
}

/// Size and variant of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: usize,
    pub height: usize,
    /// Draw tick labels, title, axis labels and the trend caption.
    pub labeled: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            labeled: true,
        }
    }
}

impl ChartOptions {
    pub fn insets(&self) -> Insets {
        if self.labeled {
            Insets::LABELED
        } else {
            Insets::PLAIN
        }
    }

    /// Vertical gridline divisions for a year span.
    ///
    /// The labeled variant uses at least 2 and at most 6; the plain
    /// variant up to 10. `year_span` is positive for any chart that
    /// gets this far.
    pub fn year_divisions(&self, year_span: i64) -> i32 {
        let divisions = if self.labeled {
            year_span.clamp(2, 6)
        } else {
            year_span.min(10)
        };
        divisions as i32
    }

    /// Reject canvases that cannot hold a plot rectangle.
    pub fn validate(&self) -> MrdsResult<()> {
        let insets = self.insets();
        let min_width = (insets.left + insets.right) as usize;
        let min_height = (insets.top + insets.bottom) as usize;
        if self.width <= min_width || self.height <= min_height {
            return Err(MrdsError::InvalidGeometry(format!(
                "canvas {}x{} leaves no plot area (needs more than {}x{})",
                self.width, self.height, min_width, min_height
            )));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(MrdsError::InvalidGeometry(format!(
                "canvas {}x{} is too large",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Title and axis captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl ChartLabels {
    /// Standard captions for a site/buffer/metric series.
    pub fn for_key(key: &SeriesKey) -> Self {
        let metric = metric_label(&key.metric);
        Self {
            title: format!("{} | {} | {} m buffer", key.site, metric, key.buffer),
            x_label: "Year".to_string(),
            y_label: format!("Value ({})", metric),
        }
    }
}

/// Why a series produced no chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than two points.
    TooFewPoints(usize),
    /// Every point has the same year.
    ConstantYears,
    /// Every point has the same value.
    ConstantValues,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::TooFewPoints(n) => write!(f, "too few points ({})", n),
            SkipReason::ConstantYears => write!(f, "all points share one year"),
            SkipReason::ConstantValues => write!(f, "all values are equal"),
        }
    }
}

/// Result of laying out one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Rendered(Canvas),
    Skipped(SkipReason),
}

impl ChartOutcome {
    pub fn into_canvas(self) -> Option<Canvas> {
        match self {
            ChartOutcome::Rendered(canvas) => Some(canvas),
            ChartOutcome::Skipped(_) => None,
        }
    }
}

/// Plot rectangle plus the data domain mapped onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub min_x: i64,
    pub max_x: i64,
    /// Padded value range.
    pub min_y: f64,
    pub max_y: f64,
}

impl PlotArea {
    /// Lay out the plot for a series, or say why it cannot be drawn.
    pub fn for_series(series: &Series, options: &ChartOptions) -> Result<Self, SkipReason> {
        if series.len() < 2 {
            return Err(SkipReason::TooFewPoints(series.len()));
        }
        let (min_x, max_x) = series.x_range().ok_or(SkipReason::TooFewPoints(0))?;
        let (min_y, max_y) = series.y_range().ok_or(SkipReason::TooFewPoints(0))?;
        if min_x == max_x {
            return Err(SkipReason::ConstantYears);
        }
        if min_y == max_y {
            return Err(SkipReason::ConstantValues);
        }

        let pad = (max_y - min_y) * VALUE_PADDING;
        let insets = options.insets();
        Ok(Self {
            x0: insets.left,
            y0: insets.top,
            x1: options.width as i32 - insets.right,
            y1: options.height as i32 - insets.bottom,
            min_x,
            max_x,
            min_y: min_y - pad,
            max_y: max_y + pad,
        })
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Distance between the first and last year, saturating at `i64::MAX`.
    pub fn year_span(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x)
    }

    /// Year to pixel column.
    pub fn x_pixel(&self, x: i64) -> i32 {
        let t = (x as f64 - self.min_x as f64) / (self.max_x as f64 - self.min_x as f64);
        self.x0 + (t * self.width() as f64) as i32
    }

    /// Value to pixel row; larger values sit higher.
    pub fn y_pixel(&self, y: f64) -> i32 {
        let t = (y - self.min_y) / (self.max_y - self.min_y);
        self.y1 - (t * self.height() as f64) as i32
    }
}

/// Render a series as a line chart.
///
/// Degenerate series (fewer than two points, one year, or one value)
/// are skipped rather than treated as errors.
pub fn render_chart(
    series: &Series,
    labels: &ChartLabels,
    options: &ChartOptions,
    theme: &ChartTheme,
) -> ChartOutcome {
    let area = match PlotArea::for_series(series, options) {
        Ok(area) => area,
        Err(reason) => {
            tracing::debug!(key = %series.key(), %reason, "Skipping chart");
            return ChartOutcome::Skipped(reason);
        }
    };

    let mut canvas = Canvas::new(options.width, options.height, theme.background);
    let x_divisions = options.year_divisions(area.year_span());

    draw_grid(&mut canvas, &area, x_divisions, theme);
    canvas.rect_outline(area.x0, area.y0, area.x1, area.y1, theme.frame);
    if options.labeled {
        draw_ticks(&mut canvas, &area, x_divisions, theme);
    }
    draw_series(&mut canvas, &area, series, theme);
    draw_trend(&mut canvas, &area, series, theme);
    if options.labeled {
        draw_labels(&mut canvas, labels, theme);
    }

    ChartOutcome::Rendered(canvas)
}

// ---- helpers ----------------------------------------------------------------

fn draw_grid(canvas: &mut Canvas, area: &PlotArea, x_divisions: i32, theme: &ChartTheme) {
    // horizontals
    for i in 1..VALUE_DIVISIONS {
        let y = area.y0 + (i as f64 * area.height() as f64 / VALUE_DIVISIONS as f64) as i32;
        canvas.line(area.x0, y, area.x1, y, theme.grid);
    }
    // verticals
    for i in 1..x_divisions {
        let x = area.x0 + (i as f64 * area.width() as f64 / x_divisions as f64) as i32;
        canvas.line(x, area.y0, x, area.y1, theme.grid);
    }
}

fn draw_ticks(canvas: &mut Canvas, area: &PlotArea, x_divisions: i32, theme: &ChartTheme) {
    let span = area.max_x as f64 - area.min_x as f64;
    for i in 0..=x_divisions {
        let t = i as f64 / x_divisions as f64;
        let year = (area.min_x as f64 + t * span).round_ties_even() as i64;
        let xp = area.x_pixel(year);
        canvas.line(xp, area.y1, xp, area.y1 + TICK_LENGTH, theme.tick);
        let label = safe_label_text(&year.to_string());
        canvas.draw_text(xp - text_width(&label, 1) / 2, area.y1 + 16, &label, theme.tick, 1);
    }

    for i in 0..=VALUE_DIVISIONS {
        let t = i as f64 / VALUE_DIVISIONS as f64;
        let value = area.max_y - t * (area.max_y - area.min_y);
        let yp = area.y0 + (t * area.height() as f64) as i32;
        canvas.line(area.x0 - TICK_LENGTH, yp, area.x0, yp, theme.tick);
        let label = safe_label_text(&format!("{:.2}", value));
        canvas.draw_text(area.x0 - 10 - text_width(&label, 1), yp - 4, &label, theme.tick, 1);
    }
}

fn draw_series(canvas: &mut Canvas, area: &PlotArea, series: &Series, theme: &ChartTheme) {
    let pixels: Vec<(i32, i32)> = series
        .points()
        .iter()
        .map(|p| (area.x_pixel(p.x), area.y_pixel(p.y)))
        .collect();
    for pair in pixels.windows(2) {
        let ((xa, ya), (xb, yb)) = (pair[0], pair[1]);
        canvas.line(xa, ya, xb, yb, theme.series);
    }
    for &(x, y) in &pixels {
        canvas.circle(x, y, MARKER_RADIUS, theme.marker);
    }
}

fn draw_trend(canvas: &mut Canvas, area: &PlotArea, series: &Series, theme: &ChartTheme) {
    if let Some(fit) = ols_fit(series.points()) {
        let y_start = fit.at(area.min_x as f64);
        let y_end = fit.at(area.max_x as f64);
        canvas.line(
            area.x_pixel(area.min_x),
            area.y_pixel(y_start),
            area.x_pixel(area.max_x),
            area.y_pixel(y_end),
            theme.trend,
        );
    }
}

fn draw_labels(canvas: &mut Canvas, labels: &ChartLabels, theme: &ChartTheme) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;
    let title = safe_label_text(&labels.title);
    let x_label = safe_label_text(&labels.x_label);
    let y_label = safe_label_text(&labels.y_label);

    canvas.draw_text((width - text_width(&title, 2)).div_euclid(2), 20, &title, theme.text, 2);
    canvas.draw_text(
        (width - text_width(&x_label, 2)).div_euclid(2),
        height - 48,
        &x_label,
        theme.text,
        2,
    );
    canvas.draw_text(10, 16, &y_label, theme.text, 1);
    canvas.draw_text(10, 30, &safe_label_text(TREND_CAPTION), theme.trend, 1);
}
