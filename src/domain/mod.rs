//! Domain module
//!
//! Core domain types: the transaction record, month filtering, price
//! buckets and request parameters.

pub mod error;
pub mod filter;
pub mod month;
pub mod price_range;
pub mod transaction;

pub use error::{DomainError, RecordError};
pub use filter::{SearchTerm, TransactionFilter, DEFAULT_PER_PAGE};
pub use month::{month_index, parse_month, parse_optional_month, require_month, MONTHS};
pub use price_range::PriceRange;
pub use transaction::ProductTransaction;
