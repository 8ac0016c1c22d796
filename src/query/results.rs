//! Query results
//!
//! Response payloads returned by [`QueryService`](super::QueryService). They
//! serialize straight to the JSON the HTTP layer sends.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ProductTransaction;

/// Page metadata for the transaction list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

/// One page of transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPage {
    pub products: Vec<ProductTransaction>,
    pub pagination: Pagination,
}

/// Sales statistics for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sale_amount: Decimal,
    pub total_sold_items: u64,
    pub total_not_sold_items: u64,
}

/// Record count for one price bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    pub range: &'static str,
    pub count: u64,
}

/// Record count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Statistics and both distributions for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub statistics: Statistics,
    pub price_range_distribution: Vec<PriceRangeCount>,
    pub category_distribution: Vec<CategoryCount>,
}
