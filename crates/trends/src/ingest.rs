//! Row cleaning and grouping.
//!
//! Turns raw string rows into typed clean rows and per-key series. Rows
//! without a site name, buffer distance or parsable year are dropped;
//! unparsable metric cells become missing values.

use std::collections::BTreeMap;

use mrds_common::{parse_float, parse_year, MrdsError, MrdsResult, SamplePoint, Series, SeriesKey, TableRow};

pub const SITE_NAME: &str = "site_name";
pub const SITE_ID: &str = "site_id";
pub const BUFFER_M: &str = "buffer_m";
pub const YEAR: &str = "year";
pub const IMAGE_COUNT: &str = "image_count";
pub const QA_FLAG: &str = "qa_flag";

/// Columns a row must carry to be grouped at all.
pub const REQUIRED_COLUMNS: [&str; 3] = [SITE_NAME, BUFFER_M, YEAR];

/// Check an input header for the grouping columns.
///
/// A header without them would silently drop every row, so this is
/// treated as a structural failure rather than per-row noise.
pub fn require_columns<S: AsRef<str>>(headers: &[S]) -> MrdsResult<()> {
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.as_ref().trim() == required) {
            return Err(MrdsError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

/// Grouping keys of a row, or `None` if any is missing.
fn row_keys(row: &TableRow) -> Option<(&str, &str, i64)> {
    let site = row.text(SITE_NAME);
    let buffer = row.text(BUFFER_M);
    let year = parse_year(row.get(YEAR))?;
    if site.is_empty() || buffer.is_empty() {
        return None;
    }
    Some((site, buffer, year))
}

/// A validated input row with its metric values coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub site_name: String,
    pub site_id: String,
    pub buffer_m: String,
    pub year: i64,
    pub image_count: Option<i64>,
    pub qa_flag: String,
    /// One entry per configured metric, in configured order.
    pub values: Vec<Option<f64>>,
}

impl CleanRow {
    /// Column names of the clean table for a metric list.
    pub fn header(metrics: &[String]) -> Vec<String> {
        [SITE_NAME, SITE_ID, BUFFER_M, YEAR, IMAGE_COUNT, QA_FLAG]
            .iter()
            .map(|c| c.to_string())
            .chain(metrics.iter().cloned())
            .collect()
    }

    /// Cells in header order; missing values are empty strings.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.site_name.clone(),
            self.site_id.clone(),
            self.buffer_m.clone(),
            self.year.to_string(),
            self.image_count.map(|c| c.to_string()).unwrap_or_default(),
            self.qa_flag.clone(),
        ];
        record.extend(
            self.values
                .iter()
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        );
        record
    }
}

/// Clean every usable row, sorted by (site, buffer, year).
pub fn clean_rows(rows: &[TableRow], metrics: &[String]) -> Vec<CleanRow> {
    let mut cleaned: Vec<CleanRow> = rows
        .iter()
        .filter_map(|row| {
            let (site, buffer, year) = row_keys(row)?;
            Some(CleanRow {
                site_name: site.to_string(),
                site_id: row.text(SITE_ID).to_string(),
                buffer_m: buffer.to_string(),
                year,
                image_count: parse_year(row.get(IMAGE_COUNT)),
                qa_flag: row.get(QA_FLAG).unwrap_or("").to_string(),
                values: metrics.iter().map(|m| parse_float(row.get(m))).collect(),
            })
        })
        .collect();

    let dropped = rows.len() - cleaned.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped rows missing site, buffer or year");
    }

    cleaned.sort_by(|a, b| {
        (a.site_name.as_str(), a.buffer_m.as_str(), a.year)
            .cmp(&(b.site_name.as_str(), b.buffer_m.as_str(), b.year))
    });
    cleaned
}

/// Group clean rows by (site, buffer) in key order.
pub fn group_site_buffer(rows: &[CleanRow]) -> BTreeMap<(String, String), Vec<&CleanRow>> {
    let mut groups: BTreeMap<(String, String), Vec<&CleanRow>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.site_name.clone(), row.buffer_m.clone()))
            .or_default()
            .push(row);
    }
    groups
}

/// Build one series per (site, buffer, metric) that has at least one value.
///
/// Series come back in key order with their points sorted by year.
pub fn group_series(rows: &[TableRow], metrics: &[String]) -> Vec<Series> {
    let mut groups: BTreeMap<SeriesKey, Vec<SamplePoint>> = BTreeMap::new();
    for row in rows {
        let Some((site, buffer, year)) = row_keys(row) else {
            continue;
        };
        for metric in metrics {
            if let Some(value) = parse_float(row.get(metric)) {
                groups
                    .entry(SeriesKey::new(site, buffer, metric.as_str()))
                    .or_default()
                    .push(SamplePoint::new(year, value));
            }
        }
    }
    groups
        .into_iter()
        .map(|(key, points)| Series::new(key, points))
        .collect()
}
