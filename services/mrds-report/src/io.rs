//! CSV input and output tables.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use mrds_common::{MrdsError, MrdsResult, TableRow};
use serde::Serialize;
use trends::ingest::require_columns;
use trends::CleanRow;

/// Header and data rows of an input table.
#[derive(Debug, Clone)]
pub struct InputTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Read a CSV with a header row into string rows.
///
/// Header names are trimmed, so `" year"` is looked up as `year`.
///
/// A missing file, malformed CSV, a header without the grouping columns
/// or a table with no data rows are all fatal.
pub fn read_table(path: &Path) -> MrdsResult<InputTable> {
    if !path.exists() {
        return Err(MrdsError::InputReadError(format!(
            "input CSV not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)
        .map_err(|e| MrdsError::InputReadError(format!("{}: {}", path.display(), e)))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    require_columns(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let values: Vec<&str> = record.iter().collect();
        rows.push(TableRow::from_record(&headers, &values));
    }

    if rows.is_empty() {
        return Err(MrdsError::EmptyInput(path.display().to_string()));
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), columns = headers.len(), "Read input table");
    Ok(InputTable { headers, rows })
}

fn create_writer(path: &Path) -> MrdsResult<Writer<File>> {
    Writer::from_path(path).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> MrdsError {
    MrdsError::OutputWriteError(format!("{}: {}", path.display(), e))
}

/// Write the clean table: fixed columns followed by one column per metric.
pub fn write_clean_table(path: &Path, rows: &[CleanRow], metrics: &[String]) -> MrdsResult<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(CleanRow::header(metrics))
        .map_err(|e| write_error(path, e))?;
    for row in rows {
        writer
            .write_record(row.to_record())
            .map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

/// Serialize records with a header row taken from their field names.
///
/// An empty slice still produces `header` so downstream readers see
/// the expected columns.
pub fn write_records<T: Serialize>(path: &Path, header: &[&str], records: &[T]) -> MrdsResult<()> {
    let mut writer = if records.is_empty() {
        let mut writer = create_writer(path)?;
        writer.write_record(header).map_err(|e| write_error(path, e))?;
        writer
    } else {
        create_writer(path)?
    };
    for record in records {
        writer.serialize(record).map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

/// `<input without extension><suffix>`, next to the input file.
pub fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let mut base = input.with_extension("").into_os_string();
    base.push(suffix);
    PathBuf::from(base)
}
