//! Raw input rows as delivered by the tabular reader.

use std::collections::HashMap;

/// One input row: column name -> raw string cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    cells: HashMap<String, String>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from parallel header/value slices. Extra values are ignored.
    pub fn from_record<H, V>(headers: &[H], values: &[V]) -> Self
    where
        H: AsRef<str>,
        V: AsRef<str>,
    {
        let cells = headers
            .iter()
            .zip(values.iter())
            .map(|(h, v)| (h.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Self { cells }
    }

    /// Builder-style cell insertion, mostly for fixtures.
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        self.cells.insert(column.to_string(), value.to_string());
    }

    /// Raw cell value, if the column is present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell value trimmed, or empty string when the column is absent.
    pub fn text(&self, column: &str) -> &str {
        self.get(column).map(str::trim).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
