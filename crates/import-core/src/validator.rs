//! Structural validation gating the row transformation

use crate::error::{Error, Result};
use crate::mapping::ColumnMapping;

/// Check rows and mappings before transformation.
///
/// Fails when there are no data rows, when the mapping count does not match
/// the column width, or when any data row's width differs from the selector
/// count. A width mismatch inside the data fails the whole batch; nothing
/// is partially transformed.
pub fn validate(rows: &[Vec<String>], mappings: &[ColumnMapping]) -> Result<()> {
    if rows.is_empty() {
        return Err(Error::InvalidStructure {
            detail: "no data rows".to_string(),
        });
    }

    if mappings.is_empty() {
        return Err(Error::IncompleteMapping);
    }

    for (index, row) in rows.iter().enumerate() {
        if row.len() != mappings.len() {
            return Err(Error::InvalidStructure {
                detail: format!(
                    "row {} has {} cells but {} mapping selectors exist",
                    index + 1,
                    row.len(),
                    mappings.len()
                ),
            });
        }
    }

    Ok(())
}

/// Resolve a caller-supplied mapping name list against the expected column
/// count. A short or over-long list means the mapping was never completed.
pub fn check_assignment_width(mapping_count: usize, column_count: usize) -> Result<()> {
    if mapping_count != column_count {
        return Err(Error::IncompleteMapping);
    }
    Ok(())
}
