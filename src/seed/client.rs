//! HTTP client for the remote seed feed

use std::time::Duration;

use reqwest::Client;

use super::SeedError;
use crate::domain::ProductTransaction;

/// Fetches the product feed: a JSON array of transaction objects.
#[derive(Debug, Clone)]
pub struct SeedClient {
    client: Client,
    url: String,
}

impl SeedClient {
    /// Create a client for `url` with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Client` if the underlying client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SeedError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Feed URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and decode the feed.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Fetch` on network failure or a non-2xx status,
    /// and `SeedError::Payload` if the body is not an array of transactions.
    pub async fn fetch(&self) -> Result<Vec<ProductTransaction>, SeedError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let records: Vec<ProductTransaction> = serde_json::from_slice(&body)?;

        tracing::debug!(url = %self.url, records = records.len(), "Fetched seed data");

        Ok(records)
    }
}
