//! CSV parser for uploaded files
//!
//! The wire format is fixed: UTF-8, `;` delimiter, first row = headers.
//! Rows are kept as raw strings; width checks happen in the validator so a
//! ragged file parses and is reported against the mapping instead of
//! failing mid-stream.

use crate::document::CsvDocument;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse raw uploaded bytes into a CsvDocument
pub fn parse_bytes(data: &[u8]) -> Result<CsvDocument> {
    parse_reader(data)
}

/// Parse CSV from a string (useful for testing)
pub fn parse_str(content: &str) -> Result<CsvDocument> {
    parse_reader(content.as_bytes())
}

/// Parse a CSV file from disk
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<CsvDocument> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_reader(BufReader::new(file))
}

fn parse_reader<R: Read>(reader: R) -> Result<CsvDocument> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    // An empty upload yields an empty header record here; that is a
    // validation condition, not a parse failure.
    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| Error::CsvParse {
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::CsvParse {
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(CsvDocument { headers, rows })
}
