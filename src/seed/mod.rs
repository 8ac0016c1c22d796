//! Seed loader
//!
//! One-shot admin operation: fetch the remote product feed and replace the
//! whole transaction collection with it.

mod client;
mod loader;

pub use client::SeedClient;
pub use loader::{SeedLoader, SeedOutcome};

use crate::domain::RecordError;
use crate::store::StoreError;

/// Seed errors
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Failed to fetch seed data: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Malformed seed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid seed record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
