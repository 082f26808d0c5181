//! Column mapping vocabulary
//!
//! A `ColumnMapping` ties a display name to the setters it drives on the
//! `Person`/`Address` pair. The setter table is resolved once, when the
//! catalog is built. "Ignore" is a pseudo-mapping with no setters; it is
//! never unique-constrained and every instance compares equal by name.

use crate::record::{Address, Person};

/// Name of the sentinel mapping that skips a column
pub const IGNORE: &str = "Ignore";

/// Setter invoked on the person side of the record pair
pub type PersonSetter = fn(&mut Person, &str);
/// Setter invoked on the address side of the record pair
pub type AddressSetter = fn(&mut Address, &str);

/// The association between a CSV column and a target output field
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    name: &'static str,
    person_setter: Option<PersonSetter>,
    address_setter: Option<AddressSetter>,
}

impl ColumnMapping {
    /// Create a mapping with its setter pair
    pub fn new(
        name: &'static str,
        person_setter: Option<PersonSetter>,
        address_setter: Option<AddressSetter>,
    ) -> Self {
        Self {
            name,
            person_setter,
            address_setter,
        }
    }

    /// Create a fresh "Ignore" sentinel; equal by name to every other one
    pub fn ignore() -> Self {
        Self::new(IGNORE, None, None)
    }

    /// Display name; also the identity key
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True for the "Ignore" sentinel
    pub fn is_ignore(&self) -> bool {
        self.name == IGNORE
    }

    /// Apply the cell value through whichever setters this mapping carries.
    /// A mapping with only one side's setter is normal, not an error.
    pub fn apply(&self, person: &mut Person, address: &mut Address, value: &str) {
        if let Some(setter) = self.person_setter {
            setter(person, value);
        }
        if let Some(setter) = self.address_setter {
            setter(address, value);
        }
    }
}

/// Mapping identity is the name; setter tables never participate
impl PartialEq for ColumnMapping {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ColumnMapping {}

impl std::fmt::Display for ColumnMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The fixed, ordered set of non-Ignore mappings a column may target
#[derive(Debug, Clone)]
pub struct MappingCatalog {
    mappings: Vec<ColumnMapping>,
}

impl MappingCatalog {
    /// Build a catalog from an explicit mapping list
    pub fn new(mappings: Vec<ColumnMapping>) -> Self {
        Self { mappings }
    }

    /// All non-Ignore mappings, in catalog order
    pub fn all(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    /// A fresh "Ignore" sentinel
    pub fn ignore(&self) -> ColumnMapping {
        ColumnMapping::ignore()
    }

    /// Resolve a display name to its mapping; "Ignore" always resolves
    pub fn find(&self, name: &str) -> Option<ColumnMapping> {
        if name == IGNORE {
            return Some(ColumnMapping::ignore());
        }
        self.mappings.iter().find(|m| m.name == name).copied()
    }
}

/// Field setters leave empty cells unset so that blank rows stay
/// unpopulated and get dropped by the transformer.
fn set_non_empty(field: &mut Option<String>, value: &str) {
    if !value.is_empty() {
        *field = Some(value.to_string());
    }
}

fn set_first_name(person: &mut Person, value: &str) {
    set_non_empty(&mut person.first_name, value);
}

fn set_last_name(person: &mut Person, value: &str) {
    set_non_empty(&mut person.last_name, value);
}

fn set_street(address: &mut Address, value: &str) {
    set_non_empty(&mut address.street, value);
}

fn set_postcode(address: &mut Address, value: &str) {
    set_non_empty(&mut address.postcode, value);
}

fn set_country(address: &mut Address, value: &str) {
    set_non_empty(&mut address.country, value);
}

impl Default for MappingCatalog {
    /// The contact-import vocabulary: First, Last, Address, ZIP, Country
    fn default() -> Self {
        Self::new(vec![
            ColumnMapping::new("First", Some(set_first_name), None),
            ColumnMapping::new("Last", Some(set_last_name), None),
            ColumnMapping::new("Address", None, Some(set_street)),
            ColumnMapping::new("ZIP", None, Some(set_postcode)),
            ColumnMapping::new("Country", None, Some(set_country)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_instances_compare_equal() {
        // Fresh instances, equality by name only
        assert_eq!(ColumnMapping::ignore(), ColumnMapping::ignore());
        assert!(ColumnMapping::ignore().is_ignore());
    }

    #[test]
    fn test_default_catalog_order() {
        let catalog = MappingCatalog::default();
        let names: Vec<&str> = catalog.all().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["First", "Last", "Address", "ZIP", "Country"]);
    }

    #[test]
    fn test_find_by_name() {
        let catalog = MappingCatalog::default();
        assert_eq!(catalog.find("ZIP").unwrap().name(), "ZIP");
        assert!(catalog.find("Ignore").unwrap().is_ignore());
        assert!(catalog.find("Nope").is_none());
    }

    #[test]
    fn test_apply_person_side_only() {
        let catalog = MappingCatalog::default();
        let first = catalog.find("First").unwrap();

        let mut person = Person::new();
        let mut address = Address::new();
        first.apply(&mut person, &mut address, "John");

        assert_eq!(person.first_name.as_deref(), Some("John"));
        assert!(address.street.is_none());
    }

    #[test]
    fn test_apply_address_side_only() {
        let catalog = MappingCatalog::default();
        let zip = catalog.find("ZIP").unwrap();

        let mut person = Person::new();
        let mut address = Address::new();
        zip.apply(&mut person, &mut address, "12345");

        assert_eq!(address.postcode.as_deref(), Some("12345"));
        assert!(person.first_name.is_none());
    }

    #[test]
    fn test_empty_value_leaves_field_unset() {
        let catalog = MappingCatalog::default();
        let first = catalog.find("First").unwrap();

        let mut person = Person::new();
        let mut address = Address::new();
        first.apply(&mut person, &mut address, "");

        assert!(person.first_name.is_none());
        assert!(!person.is_populated());
    }

    #[test]
    fn test_ignore_applies_nothing() {
        let mut person = Person::new();
        let mut address = Address::new();
        ColumnMapping::ignore().apply(&mut person, &mut address, "value");

        assert!(!person.is_populated());
    }

    #[test]
    fn test_raw_value_not_trimmed() {
        let catalog = MappingCatalog::default();
        let last = catalog.find("Last").unwrap();

        let mut person = Person::new();
        let mut address = Address::new();
        last.apply(&mut person, &mut address, "  Doe ");

        assert_eq!(person.last_name.as_deref(), Some("  Doe "));
    }
}
