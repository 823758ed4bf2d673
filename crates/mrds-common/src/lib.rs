//! Common types and utilities shared across the MRDS trend tooling.
//!
//! Holds the data model that both the statistics engine and the chart
//! renderer consume: sample points, series keyed by site/buffer/metric,
//! raw table rows, and the cell coercion rules applied to them.

pub mod error;
pub mod metrics;
pub mod parse;
pub mod row;
pub mod series;
pub mod slug;

pub use error::{MrdsError, MrdsResult};
pub use metrics::{default_metrics, metric_label, parse_metric_list, DEFAULT_METRICS};
pub use parse::{parse_float, parse_year};
pub use row::TableRow;
pub use series::{SamplePoint, Series, SeriesKey};
pub use slug::{chart_filename, clean_slug};
