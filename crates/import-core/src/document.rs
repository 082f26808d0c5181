//! In-memory representation of an uploaded CSV file

use serde::{Deserialize, Serialize};

/// A parsed CSV document: one header row plus raw data rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvDocument {
    /// Header cells from the first row (display only, not interpreted)
    pub headers: Vec<String>,
    /// Data rows; cells are kept as raw strings
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of columns (header count)
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the document holds no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a data row by index
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }
}
