//! Metric column names processed by default.

/// Metric columns summarized and plotted when none are configured.
pub const DEFAULT_METRICS: &[&str] = &[
    "mean_ndvi",
    "mean_ndmi",
    "mean_ndbi",
    "mean_ndti",
    "mean_savi",
    "mean_bsi",
    "bare_pct",
    "mining_soil_pct",
    "non_mining_soil_pct",
    "valid_px_pct",
];

/// Default metric list as owned strings.
pub fn default_metrics() -> Vec<String> {
    DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
}

/// Split a comma-separated metric list, trimming entries and dropping blanks.
pub fn parse_metric_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Human-readable label for a metric column (`mean_ndvi` -> `mean ndvi`).
pub fn metric_label(metric: &str) -> String {
    metric.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_list() {
        assert_eq!(
            parse_metric_list(" mean_ndvi, ,bare_pct,"),
            vec!["mean_ndvi".to_string(), "bare_pct".to_string()]
        );
        assert!(parse_metric_list("").is_empty());
    }

    #[test]
    fn test_default_metrics() {
        let metrics = default_metrics();
        assert_eq!(metrics.len(), 10);
        assert_eq!(metrics[0], "mean_ndvi");
        assert_eq!(metrics[9], "valid_px_pct");
    }

    #[test]
    fn test_metric_label() {
        assert_eq!(metric_label("non_mining_soil_pct"), "non mining soil pct");
    }
}
