//! Column mapping controller
//!
//! Owns one selector cell per CSV column and keeps them mutually
//! consistent: a non-Ignore mapping may be chosen by at most one column,
//! while "Ignore" stays available to all of them. All selector edits go
//! through [`ColumnMappingController::apply_change`]; no cell ever mutates
//! another directly. Each edit runs exactly one recomputation pass, derived
//! as a pure function of the current cell values, so there is no event
//! re-entry to guard against.

use crate::error::{Error, Result};
use crate::mapping::{ColumnMapping, MappingCatalog};
use std::collections::BTreeSet;
use tracing::debug;

/// Controller for the per-column mapping selectors
#[derive(Debug, Clone)]
pub struct ColumnMappingController {
    catalog: MappingCatalog,
    /// Current mapping choice per CSV column
    cells: Vec<ColumnMapping>,
    /// Names of non-Ignore mappings currently held by any cell
    selected: BTreeSet<&'static str>,
    /// Options offered to every selector: Ignore plus the unselected mappings
    available: Vec<ColumnMapping>,
}

impl ColumnMappingController {
    /// Create a controller with no selectors yet
    pub fn new(catalog: MappingCatalog) -> Self {
        let mut controller = Self {
            catalog,
            cells: Vec::new(),
            selected: BTreeSet::new(),
            available: Vec::new(),
        };
        controller.recompute();
        controller
    }

    /// Create one selector per CSV column, all set to Ignore
    pub fn init_selectors(&mut self, column_count: usize) {
        self.cells = vec![ColumnMapping::ignore(); column_count];
        self.recompute();
        debug!(column_count, "initialized mapping selectors");
    }

    /// Number of selectors (the CSV column count)
    pub fn selector_count(&self) -> usize {
        self.cells.len()
    }

    /// The catalog backing these selectors
    pub fn catalog(&self) -> &MappingCatalog {
        &self.catalog
    }

    /// Current mapping choice for a column
    pub fn value(&self, column: usize) -> Result<&ColumnMapping> {
        self.cells.get(column).ok_or(Error::ColumnOutOfRange {
            column,
            count: self.cells.len(),
        })
    }

    /// The resolved per-column mapping sequence, index-aligned with row cells
    pub fn assignments(&self) -> &[ColumnMapping] {
        &self.cells
    }

    /// The options every selector currently offers: Ignore plus all
    /// catalog mappings not selected by any column
    pub fn available(&self) -> &[ColumnMapping] {
        &self.available
    }

    /// Names of the non-Ignore mappings currently in use
    pub fn selected_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.selected.iter().copied()
    }

    /// Change the mapping for one column.
    ///
    /// If the new value is already held by another column, that column is
    /// displaced back to Ignore in the same pass, so the uniqueness
    /// invariant holds when this returns. Mapping names outside the catalog
    /// are rejected.
    pub fn apply_change(&mut self, column: usize, new_value: ColumnMapping) -> Result<()> {
        if column >= self.cells.len() {
            return Err(Error::ColumnOutOfRange {
                column,
                count: self.cells.len(),
            });
        }
        if self.catalog.find(new_value.name()).is_none() {
            return Err(Error::UnknownMapping {
                name: new_value.name().to_string(),
            });
        }

        let old_name = self.cells[column].name();
        self.cells[column] = new_value;

        // Displace any other cell holding the same non-Ignore mapping.
        // The invariant held before this edit, so at most one cell matches.
        if !new_value.is_ignore() {
            for (i, cell) in self.cells.iter_mut().enumerate() {
                if i != column && !cell.is_ignore() && cell.name() == new_value.name() {
                    debug!(column = i, mapping = cell.name(), "displacing selector to Ignore");
                    *cell = ColumnMapping::ignore();
                }
            }
        }

        self.recompute();
        debug!(
            column,
            old = old_name,
            new = new_value.name(),
            "selector changed"
        );
        Ok(())
    }

    /// Change the mapping for one column by display name
    pub fn apply_change_by_name(&mut self, column: usize, name: &str) -> Result<()> {
        let mapping = self
            .catalog
            .find(name)
            .ok_or_else(|| Error::UnknownMapping {
                name: name.to_string(),
            })?;
        self.apply_change(column, mapping)
    }

    /// Set every selector back to Ignore. Idempotent, single pass.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            *cell = ColumnMapping::ignore();
        }
        self.recompute();
        debug!("reset all selectors to Ignore");
    }

    /// Drop all selectors (used when the grid is cleared)
    pub fn clear(&mut self) {
        self.cells.clear();
        self.recompute();
    }

    /// Recompute `selected` and `available` from the cells. This is the
    /// single atomic pass per edit: both derived views are a pure function
    /// of the current cell values.
    fn recompute(&mut self) {
        self.selected = self
            .cells
            .iter()
            .filter(|c| !c.is_ignore())
            .map(|c| c.name())
            .collect();

        self.available = self
            .catalog
            .all()
            .iter()
            .filter(|m| !self.selected.contains(m.name()))
            .copied()
            .collect();
        self.available.push(self.catalog.ignore());
    }
}
