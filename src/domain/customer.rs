//! Customer identity as supplied by the Auth Provider.
//!
//! The loyalty core never verifies credentials itself; it receives an opaque,
//! already-authenticated customer identifier and only checks that the value is
//! shaped like one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a customer identifier.
pub const CUSTOMER_ID_MAX: usize = 128;

/// Validation errors returned by [`CustomerId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdValidationError {
    Empty,
    Untrimmed,
    TooLong { max: usize },
}

impl fmt::Display for CustomerIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "customer id must not be empty"),
            Self::Untrimmed => write!(f, "customer id must not contain surrounding whitespace"),
            Self::TooLong { max } => write!(f, "customer id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for CustomerIdValidationError {}

/// Opaque customer identifier owned by the Auth Provider.
///
/// Stored verbatim; the loyalty core treats it as a stable foreign key and
/// attaches no structure beyond basic shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Validate and construct a [`CustomerId`].
    pub fn new(id: impl Into<String>) -> Result<Self, CustomerIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CustomerIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(CustomerIdValidationError::Untrimmed);
        }
        if id.chars().count() > CUSTOMER_ID_MAX {
            return Err(CustomerIdValidationError::TooLong {
                max: CUSTOMER_ID_MAX,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = CustomerIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[test]
    fn accepts_opaque_identifiers() {
        let id = CustomerId::new("auth0|5f7c8ec7c33c6c004bbafe82").expect("valid id");
        assert_eq!(id.as_ref(), "auth0|5f7c8ec7c33c6c004bbafe82");
    }

    #[rstest]
    #[case("", CustomerIdValidationError::Empty)]
    #[case(" cust-1", CustomerIdValidationError::Untrimmed)]
    #[case("cust-1\n", CustomerIdValidationError::Untrimmed)]
    fn rejects_malformed_identifiers(
        #[case] raw: &str,
        #[case] expected: CustomerIdValidationError,
    ) {
        assert_eq!(CustomerId::new(raw), Err(expected));
    }

    #[test]
    fn rejects_oversized_identifiers() {
        let raw = "x".repeat(CUSTOMER_ID_MAX + 1);
        assert_eq!(
            CustomerId::new(raw),
            Err(CustomerIdValidationError::TooLong {
                max: CUSTOMER_ID_MAX
            })
        );
    }

    #[test]
    fn round_trips_through_serde() {
        let id = CustomerId::new("cust-42").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"cust-42\"");
        let back: CustomerId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);
    }
}
