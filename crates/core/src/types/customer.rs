//! Customer contact data attached to an invoice.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Customer`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// A required contact field is empty or whitespace.
    #[error("customer {0} cannot be blank")]
    Blank(&'static str),
}

/// Lowercase a contact value or a search query.
///
/// Stored contact fields and lookups both go through this, which is what
/// makes searches case-insensitive.
#[must_use]
pub fn normalize_contact(value: &str) -> String {
    value.to_lowercase()
}

/// The buyer's contact details.
///
/// All three fields are required and stored lowercased. Each one is an
/// independently searchable key in the invoice store.
///
/// ## Examples
///
/// ```
/// use tiendita_core::Customer;
///
/// let customer = Customer::new("Ana", "Ana@X.com", "555").unwrap();
/// assert_eq!(customer.email(), "ana@x.com");
///
/// assert!(Customer::new("Ana", "", "555").is_err());
/// assert!(Customer::new("  ", "ana@x.com", "555").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Customer {
    name: String,
    email: String,
    phone: String,
}

impl Customer {
    /// Build a customer from raw form input.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::Blank` naming the first field that is empty
    /// or only whitespace.
    pub fn new(name: &str, email: &str, phone: &str) -> Result<Self, CustomerError> {
        for (field, value) in [("name", name), ("email", email), ("phone", phone)] {
            if value.trim().is_empty() {
                return Err(CustomerError::Blank(field));
            }
        }

        Ok(Self {
            name: normalize_contact(name),
            email: normalize_contact(email),
            phone: normalize_contact(phone),
        })
    }

    /// Lowercased customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Lowercased phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_every_field() {
        let customer = Customer::new("ANA Pérez", "Foo@Bar.com", "555-ABC").unwrap();
        assert_eq!(customer.name(), "ana pérez");
        assert_eq!(customer.email(), "foo@bar.com");
        assert_eq!(customer.phone(), "555-abc");
    }

    #[test]
    fn test_blank_fields_are_rejected_in_order() {
        assert_eq!(
            Customer::new("", "", ""),
            Err(CustomerError::Blank("name"))
        );
        assert_eq!(
            Customer::new("ana", " ", "555"),
            Err(CustomerError::Blank("email"))
        );
        assert_eq!(
            Customer::new("ana", "ana@x.com", "\t"),
            Err(CustomerError::Blank("phone"))
        );
    }

    #[test]
    fn test_serializes_as_plain_fields() {
        let customer = Customer::new("Ana", "ana@x.com", "555").unwrap();
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "ana", "email": "ana@x.com", "phone": "555"})
        );
    }
}
