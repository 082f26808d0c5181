//! import-core: Core library for CSV column mapping and contact import
//!
//! This library provides functionality to:
//! - Parse semicolon-delimited CSV uploads into raw row data
//! - Offer a fixed catalog of column-to-field mappings plus an "Ignore" option
//! - Keep per-column mapping selectors mutually consistent (each target
//!   field used at most once)
//! - Validate the row layout against the current mapping
//! - Transform rows into linked Person/Address records and persist them as
//!   a batch

pub mod controller;
pub mod document;
pub mod error;
pub mod mapping;
pub mod notify;
pub mod parser;
pub mod record;
pub mod repository;
pub mod session;
pub mod transformer;
pub mod validator;

pub use controller::ColumnMappingController;
pub use document::CsvDocument;
pub use error::{Error, Result};
pub use mapping::{ColumnMapping, MappingCatalog, IGNORE};
pub use notify::{Notifier, RecordingNotifier, Severity};
pub use parser::{parse_bytes, parse_file, parse_str};
pub use record::{Address, Person};
pub use repository::{BatchStore, JsonFileRepository, MemoryRepository, Repository, SavedBatch};
pub use session::{ImportSession, ImportSummary};
pub use transformer::transform;
pub use validator::validate;
