//! Import session tying the pipeline together
//!
//! One session covers one import attempt: load a file, adjust the column
//! mapping selectors, then save. All errors are terminal for the attempt;
//! the user re-triggers the action.

use crate::controller::ColumnMappingController;
use crate::document::CsvDocument;
use crate::error::{Error, Result};
use crate::mapping::MappingCatalog;
use crate::notify::{Notifier, Severity};
use crate::parser;
use crate::record::Person;
use crate::repository::Repository;
use crate::transformer;
use crate::validator;
use tracing::{info, warn};

/// Outcome of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records persisted
    pub records_saved: usize,
    /// Rows dropped as unpopulated
    pub rows_dropped: usize,
}

/// A single user's import session: parsed document plus mapping selectors
#[derive(Debug)]
pub struct ImportSession {
    document: Option<CsvDocument>,
    controller: ColumnMappingController,
}

impl ImportSession {
    /// Create a session with the given mapping catalog
    pub fn new(catalog: MappingCatalog) -> Self {
        Self {
            document: None,
            controller: ColumnMappingController::new(catalog),
        }
    }

    /// Check a filename at the upload boundary; only `.csv` is accepted
    pub fn accept_filename(name: &str) -> Result<()> {
        let accepted = name
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv") && ext.len() < name.len());
        if accepted {
            Ok(())
        } else {
            Err(Error::Rejected {
                reason: format!("'{name}' is not a .csv file"),
            })
        }
    }

    /// Parse uploaded bytes and initialize one selector per column.
    /// On a parse failure the session state is left unchanged.
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<()> {
        let document = parser::parse_bytes(data)?;
        self.install(document);
        Ok(())
    }

    /// Parse CSV text and initialize one selector per column
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let document = parser::parse_str(content)?;
        self.install(document);
        Ok(())
    }

    fn install(&mut self, document: CsvDocument) {
        self.controller.init_selectors(document.column_count());
        info!(
            columns = document.column_count(),
            rows = document.row_count(),
            "loaded CSV document"
        );
        self.document = Some(document);
    }

    /// The currently loaded document, if any
    pub fn document(&self) -> Option<&CsvDocument> {
        self.document.as_ref()
    }

    /// The mapping selector controller
    pub fn controller(&self) -> &ColumnMappingController {
        &self.controller
    }

    /// Change the mapping for one column by display name
    pub fn set_mapping(&mut self, column: usize, name: &str) -> Result<()> {
        self.controller.apply_change_by_name(column, name)
    }

    /// Set every selector back to Ignore, keeping the loaded data
    pub fn reset_mappings(&mut self) {
        self.controller.reset_all();
    }

    /// Drop the loaded document and all selectors
    pub fn clear(&mut self) {
        self.document = None;
        self.controller.clear();
    }

    /// Validate, transform, and persist the current rows.
    ///
    /// Every outcome is surfaced through the notifier; the returned error
    /// carries the same condition for programmatic callers.
    pub fn save<R: Repository, N: Notifier>(
        &self,
        repository: &mut R,
        notifier: &mut N,
    ) -> Result<ImportSummary> {
        let rows: &[Vec<String>] = self.document.as_ref().map_or(&[], |d| &d.rows);
        let mappings = self.controller.assignments();

        if let Err(e) = validator::validate(rows, mappings) {
            match &e {
                Error::IncompleteMapping => {
                    notifier.show("Please complete the mapping!", Severity::Default)
                }
                _ => notifier.show("Invalid CSV structure!", Severity::Default),
            }
            return Err(e);
        }

        let records = transformer::transform(rows, mappings);
        if records.is_empty() {
            warn!("all rows dropped as unpopulated");
            notifier.show("No valid data to import.", Severity::Default);
            return Err(Error::EmptyResult);
        }

        let rows_dropped = rows.len() - records.len();
        self.persist(repository, notifier, &records)?;

        Ok(ImportSummary {
            records_saved: records.len(),
            rows_dropped,
        })
    }

    fn persist<R: Repository, N: Notifier>(
        &self,
        repository: &mut R,
        notifier: &mut N,
        records: &[Person],
    ) -> Result<()> {
        match repository.save_all(records) {
            Ok(()) => {
                notifier.show("Data saved successfully!", Severity::Success);
                Ok(())
            }
            Err(e) => {
                let message = match e {
                    Error::Persistence { message } => message,
                    other => other.to_string(),
                };
                notifier.show(
                    &format!("An error occurred while saving the data: {message}"),
                    Severity::Error,
                );
                Err(Error::Persistence { message })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use crate::notify::RecordingNotifier;

    const SAMPLE: &str = "\
Vorname;Nachname;Strasse;PLZ;Land
John;Doe;123 Main St;12345;USA
Jane;Roe;456 Oak Ave;67890;Canada
";

    fn loaded_session() -> ImportSession {
        let mut session = ImportSession::new(MappingCatalog::default());
        session.load_str(SAMPLE).unwrap();
        session
    }

    #[test]
    fn test_accept_filename() {
        assert!(ImportSession::accept_filename("contacts.csv").is_ok());
        assert!(ImportSession::accept_filename("Contacts.CSV").is_ok());
        assert!(matches!(
            ImportSession::accept_filename("contacts.xlsx"),
            Err(Error::Rejected { .. })
        ));
        assert!(matches!(
            ImportSession::accept_filename("csv"),
            Err(Error::Rejected { .. })
        ));
    }

    #[test]
    fn test_load_initializes_selectors() {
        let session = loaded_session();
        assert_eq!(session.controller().selector_count(), 5);
        assert_eq!(session.document().unwrap().row_count(), 2);
    }

    #[test]
    fn test_save_full_pipeline() {
        let mut session = loaded_session();
        for (i, name) in ["First", "Last", "Address", "ZIP", "Country"]
            .iter()
            .enumerate()
        {
            session.set_mapping(i, name).unwrap();
        }

        let mut repo = MemoryRepository::new();
        let mut notifier = RecordingNotifier::new();
        let summary = session.save(&mut repo, &mut notifier).unwrap();

        assert_eq!(summary.records_saved, 2);
        assert_eq!(summary.rows_dropped, 0);
        assert_eq!(repo.records[0].first_name.as_deref(), Some("John"));
        assert_eq!(repo.records[1].address.country.as_deref(), Some("Canada"));
        assert_eq!(
            notifier.last(),
            Some(&("Data saved successfully!".to_string(), Severity::Success))
        );
    }

    #[test]
    fn test_save_without_document_is_structural_error() {
        let session = ImportSession::new(MappingCatalog::default());
        let mut repo = MemoryRepository::new();
        let mut notifier = RecordingNotifier::new();

        let err = session.save(&mut repo, &mut notifier).unwrap_err();

        assert!(matches!(err, Error::InvalidStructure { .. }));
        assert_eq!(notifier.last().unwrap().0, "Invalid CSV structure!");
        assert!(repo.records.is_empty());
    }

    #[test]
    fn test_save_headers_only_is_structural_error() {
        let mut session = ImportSession::new(MappingCatalog::default());
        session.load_str("a;b\n").unwrap();

        let mut repo = MemoryRepository::new();
        let mut notifier = RecordingNotifier::new();
        let err = session.save(&mut repo, &mut notifier).unwrap_err();

        assert!(matches!(err, Error::InvalidStructure { .. }));
    }

    #[test]
    fn test_save_all_ignore_reports_empty_result() {
        let session = loaded_session();

        let mut repo = MemoryRepository::new();
        let mut notifier = RecordingNotifier::new();
        let err = session.save(&mut repo, &mut notifier).unwrap_err();

        assert!(matches!(err, Error::EmptyResult));
        assert_eq!(notifier.last().unwrap().0, "No valid data to import.");
        assert!(repo.records.is_empty());
    }

    #[test]
    fn test_save_failure_reported_with_cause() {
        struct FailingRepository;
        impl Repository for FailingRepository {
            fn save_all(&mut self, _records: &[Person]) -> Result<()> {
                Err(Error::Persistence {
                    message: "disk full".to_string(),
                })
            }
        }

        let mut session = loaded_session();
        session.set_mapping(0, "First").unwrap();

        let mut repo = FailingRepository;
        let mut notifier = RecordingNotifier::new();
        let err = session.save(&mut repo, &mut notifier).unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        let (message, severity) = notifier.last().unwrap();
        assert!(message.starts_with("An error occurred while saving the data:"));
        assert_eq!(*severity, Severity::Error);
    }

    #[test]
    fn test_reset_keeps_document() {
        let mut session = loaded_session();
        session.set_mapping(0, "First").unwrap();

        session.reset_mappings();

        assert!(session.document().is_some());
        assert_eq!(session.controller().selected_names().count(), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut session = loaded_session();
        session.clear();

        assert!(session.document().is_none());
        assert_eq!(session.controller().selector_count(), 0);
    }

    #[test]
    fn test_parse_failure_leaves_state_unchanged() {
        let mut session = loaded_session();
        let err = session
            .load_bytes(b"a;b\nbad;\xff\xfe\n")
            .unwrap_err();

        assert!(matches!(err, Error::CsvParse { .. }));
        assert_eq!(session.document().unwrap().row_count(), 2);
        assert_eq!(session.controller().selector_count(), 5);
    }

    #[test]
    fn test_partial_mapping_drops_unpopulated_rows() {
        let mut session = ImportSession::new(MappingCatalog::default());
        session
            .load_str("First;Last\nJohn;Doe\n;\n")
            .unwrap();
        session.set_mapping(0, "First").unwrap();
        session.set_mapping(1, "Last").unwrap();

        let mut repo = MemoryRepository::new();
        let mut notifier = RecordingNotifier::new();
        let summary = session.save(&mut repo, &mut notifier).unwrap();

        assert_eq!(summary.records_saved, 1);
        assert_eq!(summary.rows_dropped, 1);
    }
}
