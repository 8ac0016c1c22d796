//! Transaction Dashboard Library
//!
//! Re-exports modules for the binaries and integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod domain;
pub mod error;
pub mod query;
pub mod seed;
pub mod store;

pub use app::{build_router, open_store};
pub use config::Config;
pub use domain::{DomainError, PriceRange, ProductTransaction, TransactionFilter};
pub use error::{AppError, AppResult};
