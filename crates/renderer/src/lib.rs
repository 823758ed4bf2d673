//! Chart rendering for yearly metric series.
//!
//! Everything is drawn in software onto an RGB [`Canvas`]:
//! - Integer line, rectangle and circle rasterization
//! - 5x7 bitmap text
//! - Line-chart layout with an OLS trend overlay
//! - PNG encoding (truecolor, single IDAT)

pub mod canvas;
pub mod chart;
pub mod font;
pub mod png;
pub mod style;

pub use canvas::Canvas;
pub use chart::{render_chart, ChartLabels, ChartOptions, ChartOutcome, Insets, PlotArea, SkipReason};
pub use png::create_png_rgb;
pub use style::{ChartTheme, Rgb};
