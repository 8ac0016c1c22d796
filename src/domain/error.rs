//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid dashboard request parameters.
///
/// Every variant is the caller's fault and maps to a 400 response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A required query parameter was not supplied
    #[error("{0} is required")]
    MissingParameter(&'static str),

    /// Month name is not one of "January" … "December"
    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    /// Page or page-size parameter is not a positive integer
    #[error("Invalid {name}: {value}")]
    InvalidPagination { name: &'static str, value: String },
}

impl DomainError {
    /// Create an invalid pagination error
    pub fn invalid_pagination(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidPagination {
            name,
            value: value.into(),
        }
    }
}

/// A transaction record that breaks a data invariant
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordError {
    #[error("Negative price {price} on transaction {id}")]
    NegativePrice { id: i64, price: Decimal },
}
