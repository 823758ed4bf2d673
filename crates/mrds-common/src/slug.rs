//! Filesystem-safe names for chart output.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::series::SeriesKey;

static UNSAFE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^A-Za-z0-9._-]+").expect("failed to compile slug regex"));

/// Collapse every run of characters outside `[A-Za-z0-9._-]` into a single
/// underscore, then trim leading and trailing underscores.
///
/// ```
/// use mrds_common::clean_slug;
/// assert_eq!(clean_slug("Mine #1 (North)"), "Mine_1_North");
/// ```
pub fn clean_slug(text: &str) -> String {
    UNSAFE_RUN_RE
        .replace_all(text, "_")
        .trim_matches('_')
        .to_string()
}

/// Chart file name for a series: `<site>__<buffer>m__<metric>.png`.
pub fn chart_filename(key: &SeriesKey) -> String {
    format!(
        "{}__{}m__{}.png",
        clean_slug(&key.site),
        clean_slug(&key.buffer),
        clean_slug(&key.metric)
    )
}
