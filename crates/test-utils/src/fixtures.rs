//! Common input fixtures for MRDS tests.
//!
//! Rows mirror the long-form export: one row per (site, buffer, year)
//! with one column per metric.

use mrds_common::{SamplePoint, TableRow};

/// Column header of the long-form export used by the fixtures.
pub const EXPORT_HEADER: [&str; 8] = [
    "site_name",
    "site_id",
    "buffer_m",
    "year",
    "image_count",
    "qa_flag",
    "mean_ndvi",
    "bare_pct",
];

/// Site names that exercise the slug rules.
pub mod sites {
    pub const DIVISADERO: &str = "Divisadero Mine";
    pub const NORTH: &str = "Mine #1 (North)";
}

/// Build a table row for a site/buffer/year with optional metric values.
pub fn export_row(site: &str, buffer: &str, year: i64, ndvi: Option<f64>, bare: Option<f64>) -> TableRow {
    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    TableRow::new()
        .with("site_name", site)
        .with("site_id", "S-1")
        .with("buffer_m", buffer)
        .with("year", &year.to_string())
        .with("image_count", "12")
        .with("qa_flag", "ok")
        .with("mean_ndvi", &cell(ndvi))
        .with("bare_pct", &cell(bare))
}

/// Rows for one site/buffer carrying the given NDVI points and no bare_pct.
pub fn ndvi_rows(site: &str, buffer: &str, points: &[SamplePoint]) -> Vec<TableRow> {
    points
        .iter()
        .map(|p| export_row(site, buffer, p.x, Some(p.y), None))
        .collect()
}

/// Render rows as CSV text with `EXPORT_HEADER` columns.
///
/// Cells are quoted by the `csv` writer where needed.
pub fn export_csv(rows: &[TableRow]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADER)
        .expect("Failed to write fixture header");
    for row in rows {
        let cells = EXPORT_HEADER.iter().map(|c| row.get(c).unwrap_or(""));
        writer.write_record(cells).expect("Failed to write fixture row");
    }
    let bytes = writer.into_inner().expect("Failed to flush fixture CSV");
    String::from_utf8(bytes).expect("Fixture CSV is not UTF-8")
}
