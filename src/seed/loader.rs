//! Seed loader
//!
//! Replaces the stored collection with the remote feed.

use std::sync::Arc;

use serde::Serialize;

use super::{SeedClient, SeedError};
use crate::store::TransactionStore;

/// Result of a successful seed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    /// Number of records now in the store
    pub count: u64,
}

/// Fetch-then-replace seed loader
#[derive(Clone)]
pub struct SeedLoader {
    client: SeedClient,
    store: Arc<dyn TransactionStore>,
}

impl SeedLoader {
    /// Create a loader that fetches with `client` and writes to `store`
    pub fn new(client: SeedClient, store: Arc<dyn TransactionStore>) -> Self {
        Self { client, store }
    }

    /// Fetch the feed and replace every stored record with it.
    ///
    /// The feed is fetched and validated before anything is deleted, so a
    /// network or payload failure leaves the store untouched.
    pub async fn run(&self) -> Result<SeedOutcome, SeedError> {
        tracing::info!(url = %self.client.url(), "Seeding product transactions");

        let records = self.client.fetch().await?;
        for record in &records {
            record.validate()?;
        }

        let count = self.store.replace_all(records).await?;

        tracing::info!(count, "Database initialized with seed data");

        Ok(SeedOutcome { count })
    }
}

impl std::fmt::Debug for SeedLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedLoader")
            .field("url", &self.client.url())
            .finish_non_exhaustive()
    }
}
