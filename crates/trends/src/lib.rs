//! Trend statistics for yearly metric series.
//!
//! - Slope estimators: ordinary least squares and Theil-Sen
//! - Direction classification of a slope
//! - Row cleaning and grouping of raw input rows
//! - Per-(site, buffer, metric) trend summaries

pub mod ingest;
pub mod stats;
pub mod summary;

pub use ingest::{clean_rows, group_series, group_site_buffer, CleanRow};
pub use stats::{classify_direction, ols_fit, theil_sen_slope, Direction, LinearFit};
pub use summary::{summarize, summarize_clean_rows, TrendConfig, TrendResult};
