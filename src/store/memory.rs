//! In-memory transaction store
//!
//! Keeps records in insertion order behind a `tokio` lock. Used by the test
//! suite and by `STORE_BACKEND=memory` for running without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Month;
use tokio::sync::RwLock;

use super::{MonthSummary, PriceRangeCounts, StoreResult, TransactionStore};
use crate::domain::{PriceRange, ProductTransaction, TransactionFilter};

/// In-memory implementation of [`TransactionStore`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<Vec<ProductTransaction>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with `records`
    pub fn with_records(records: Vec<ProductTransaction>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Snapshot of every stored record
    pub async fn all(&self) -> Vec<ProductTransaction> {
        self.records.read().await.clone()
    }
}

fn matches_filter(record: &ProductTransaction, filter: &TransactionFilter) -> bool {
    let month_ok = filter
        .month
        .map_or(true, |month| record.sold_in_month(month));

    let search_ok = filter.search.as_ref().map_or(true, |term| {
        term.matches_text(&record.title)
            || term.matches_text(&record.description)
            || term.price() == Some(record.price)
    });

    month_ok && search_ok
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn replace_all(&self, records: Vec<ProductTransaction>) -> StoreResult<u64> {
        let mut stored = self.records.write().await;
        *stored = records;
        Ok(stored.len() as u64)
    }

    async fn find_page(&self, filter: &TransactionFilter) -> StoreResult<Vec<ProductTransaction>> {
        let stored = self.records.read().await;
        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.limit()).unwrap_or(usize::MAX);

        Ok(stored
            .iter()
            .filter(|record| matches_filter(record, filter))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_matching(&self, filter: &TransactionFilter) -> StoreResult<u64> {
        let stored = self.records.read().await;
        Ok(stored
            .iter()
            .filter(|record| matches_filter(record, filter))
            .count() as u64)
    }

    async fn month_summary(&self, month: Month) -> StoreResult<MonthSummary> {
        let stored = self.records.read().await;
        let summary = stored
            .iter()
            .filter(|record| record.sold_in_month(month))
            .fold(MonthSummary::default(), |mut summary, record| {
                if record.sold {
                    summary.total_sale_amount += record.price;
                    summary.sold_items += 1;
                } else {
                    summary.not_sold_items += 1;
                }
                summary
            });
        Ok(summary)
    }

    async fn price_range_counts(&self, month: Month) -> StoreResult<PriceRangeCounts> {
        let stored = self.records.read().await;
        let mut counts: PriceRangeCounts = [0; PriceRange::ALL.len()];
        for record in stored.iter().filter(|record| record.sold_in_month(month)) {
            counts[PriceRange::index_for(record.price)] += 1;
        }
        Ok(counts)
    }

    async fn category_counts(&self, month: Month) -> StoreResult<Vec<(String, u64)>> {
        let stored = self.records.read().await;
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for record in stored.iter().filter(|record| record.sold_in_month(month)) {
            *counts.entry(record.category.as_str()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(category, count)| (category.to_string(), count))
            .collect())
    }
}
