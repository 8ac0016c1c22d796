//! Transaction store
//!
//! Port for the data store holding product transactions. The query service
//! and seed loader only talk to [`TransactionStore`]; implementations decide
//! how filters and aggregations are executed.
//!
//! - [`PgTransactionStore`]: PostgreSQL, aggregations run in SQL
//! - [`InMemoryTransactionStore`]: `Vec` behind a lock, for tests and local runs

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::Month;
use rust_decimal::Decimal;

use crate::domain::{PriceRange, ProductTransaction, TransactionFilter};

pub use memory::InMemoryTransactionStore;
pub use postgres::PgTransactionStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Sold / not-sold totals for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthSummary {
    /// Sum of `price` over sold records
    pub total_sale_amount: Decimal,
    pub sold_items: u64,
    pub not_sold_items: u64,
}

/// Per-bucket record counts, indexed like [`PriceRange::ALL`]
pub type PriceRangeCounts = [u64; PriceRange::ALL.len()];

/// Data store for product transactions
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Delete every record, then insert `records`. Returns the inserted count.
    async fn replace_all(&self, records: Vec<ProductTransaction>) -> StoreResult<u64>;

    /// One page of records matching the filter's month and search, in
    /// insertion order.
    async fn find_page(&self, filter: &TransactionFilter) -> StoreResult<Vec<ProductTransaction>>;

    /// Number of records matching the filter's month and search, ignoring
    /// the page selection.
    async fn count_matching(&self, filter: &TransactionFilter) -> StoreResult<u64>;

    /// Sold / not-sold totals for records sold in `month`
    async fn month_summary(&self, month: Month) -> StoreResult<MonthSummary>;

    /// Record counts per price bucket for `month`
    async fn price_range_counts(&self, month: Month) -> StoreResult<PriceRangeCounts>;

    /// Record counts per category for `month`, in no particular order
    async fn category_counts(&self, month: Month) -> StoreResult<Vec<(String, u64)>>;
}

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid stored value: {0}")]
    InvalidData(String),
}
