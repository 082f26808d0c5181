//! Output record types built from mapped CSV rows

use serde::{Deserialize, Serialize};

/// A person record assembled from one CSV row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// First name, set by the "First" mapping
    pub first_name: Option<String>,
    /// Last name, set by the "Last" mapping
    pub last_name: Option<String>,
    /// Linked address, one per person
    pub address: Address,
}

impl Person {
    /// Create an empty person with an empty address
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any field on the person or its address was set
    pub fn is_populated(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.address.street.is_some()
            || self.address.postcode.is_some()
            || self.address.country.is_some()
    }
}

/// Address fields assembled from one CSV row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street, set by the "Address" mapping
    pub street: Option<String>,
    /// Postcode, set by the "ZIP" mapping
    pub postcode: Option<String>,
    /// Country, set by the "Country" mapping
    pub country: Option<String>,
}

impl Address {
    /// Create an empty address
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_person_not_populated() {
        assert!(!Person::new().is_populated());
    }

    #[test]
    fn test_person_field_counts_as_populated() {
        let mut person = Person::new();
        person.last_name = Some("Doe".to_string());
        assert!(person.is_populated());
    }

    #[test]
    fn test_address_field_counts_as_populated() {
        let mut person = Person::new();
        person.address.postcode = Some("12345".to_string());
        assert!(person.is_populated());
    }
}
