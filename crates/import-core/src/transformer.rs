//! Row transformation: validated rows + resolved mappings -> person records

use crate::mapping::ColumnMapping;
use crate::record::{Address, Person};
use tracing::debug;

/// Transform rows into person records according to the per-column mappings.
///
/// Mappings are index-aligned with row cells. Cell values pass through the
/// mapping setters untouched; rows where no field ends up set are dropped
/// silently, in keeping with the import semantics (an all-Ignore mapping or
/// a blank row is not an error).
pub fn transform(rows: &[Vec<String>], mappings: &[ColumnMapping]) -> Vec<Person> {
    let mut records = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        let mut person = Person::new();
        let mut address = Address::new();

        for (cell, mapping) in row.iter().zip(mappings) {
            if !mapping.is_ignore() {
                mapping.apply(&mut person, &mut address, cell);
            }
        }

        if person.is_populated() || address_populated(&address) {
            person.address = address;
            records.push(person);
        } else {
            debug!(row = index + 1, "dropping unpopulated row");
        }
    }

    records
}

fn address_populated(address: &Address) -> bool {
    address.street.is_some() || address.postcode.is_some() || address.country.is_some()
}
