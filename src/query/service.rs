//! Query Service
//!
//! Stateless read operations over the transaction store. Every method takes
//! already-validated parameters and returns plain data; HTTP concerns live in
//! the API layer.

use std::sync::Arc;

use chrono::Month;

use super::results::{
    CategoryCount, CombinedData, Pagination, PriceRangeCount, Statistics, TransactionPage,
};
use crate::domain::{PriceRange, TransactionFilter};
use crate::store::{StoreResult, TransactionStore};

/// Query Service for the dashboard read models
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn TransactionStore>,
}

impl QueryService {
    /// Create a new QueryService
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// List one page of transactions matching the filter.
    ///
    /// A page past the end yields no products; `total` is unaffected.
    pub async fn list_transactions(&self, filter: &TransactionFilter) -> StoreResult<TransactionPage> {
        let products = self.store.find_page(filter).await?;
        let total = self.store.count_matching(filter).await?;

        Ok(TransactionPage {
            products,
            pagination: Pagination {
                total,
                page: filter.page,
                per_page: filter.per_page,
                total_pages: filter.total_pages(total),
            },
        })
    }

    /// Sale amount and sold / not-sold counts for `month`, any year
    pub async fn statistics(&self, month: Month) -> StoreResult<Statistics> {
        let summary = self.store.month_summary(month).await?;

        Ok(Statistics {
            total_sale_amount: summary.total_sale_amount,
            total_sold_items: summary.sold_items,
            total_not_sold_items: summary.not_sold_items,
        })
    }

    /// Counts for all ten price buckets in fixed order, zeros included
    pub async fn price_range_distribution(&self, month: Month) -> StoreResult<Vec<PriceRangeCount>> {
        let counts = self.store.price_range_counts(month).await?;

        Ok(PriceRange::ALL
            .iter()
            .zip(counts)
            .map(|(range, count)| PriceRangeCount {
                range: range.label,
                count,
            })
            .collect())
    }

    /// Counts per category, largest first; ties by category name
    pub async fn category_distribution(&self, month: Month) -> StoreResult<Vec<CategoryCount>> {
        let mut distribution: Vec<CategoryCount> = self
            .store
            .category_counts(month)
            .await?
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();

        distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

        Ok(distribution)
    }

    /// Statistics and both distributions, queried concurrently.
    ///
    /// Fails as a whole if any of the three queries fails.
    pub async fn combined(&self, month: Month) -> StoreResult<CombinedData> {
        let (statistics, price_range_distribution, category_distribution) = tokio::try_join!(
            self.statistics(month),
            self.price_range_distribution(month),
            self.category_distribution(month),
        )?;

        Ok(CombinedData {
            statistics,
            price_range_distribution,
            category_distribution,
        })
    }
}

impl std::fmt::Debug for QueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryService").finish_non_exhaustive()
    }
}
