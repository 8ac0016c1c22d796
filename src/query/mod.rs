//! Query module
//!
//! Read-side service behind the dashboard: turns filter parameters into store
//! queries and shapes the results into response payloads.

mod results;
mod service;

pub use results::{CategoryCount, CombinedData, Pagination, PriceRangeCount, Statistics, TransactionPage};
pub use service::QueryService;
