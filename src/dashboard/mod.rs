//! Dashboard
//!
//! Server-rendered transaction dashboard: month selector, search box,
//! paginated transaction table, statistics cards and the price-range chart.
//!
//! Filter state lives in the URL. Each request builds an immutable
//! [`DashboardQuery`] and renders from the query service's results. Query
//! failures are logged and the page falls back to an empty, zeroed view.

mod charts;
mod views;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use chrono::Month;
use maud::Markup;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{parse_month, PriceRange, SearchTerm, TransactionFilter};
use crate::query::{Pagination, PriceRangeCount, QueryService, Statistics, TransactionPage};

/// Month shown when none is selected
pub const DEFAULT_MONTH: Month = Month::March;

/// Rows per table page
pub const ROWS_PER_PAGE: u32 = 10;

/// Raw dashboard query string
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

/// Dashboard filter state for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub month: Month,
    pub search: String,
    pub page: u32,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            month: DEFAULT_MONTH,
            search: String::new(),
            page: 1,
        }
    }
}

impl DashboardQuery {
    /// Build filter state from the URL. Unusable values fall back to defaults
    /// since the page only ever links to valid ones.
    pub fn from_params(params: &DashboardParams) -> Self {
        let month = params
            .month
            .as_deref()
            .and_then(|name| parse_month(name).ok())
            .unwrap_or(DEFAULT_MONTH);

        let page = params
            .page
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);

        Self {
            month,
            search: params.search.clone().unwrap_or_default(),
            page,
        }
    }

    /// Transaction list filter for this state
    pub fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            month: Some(self.month),
            search: SearchTerm::parse(&self.search),
            page: self.page,
            per_page: ROWS_PER_PAGE,
        }
    }

    /// Same filters on another page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Dashboard URL for this state
    pub fn href(&self) -> String {
        let page = self.page.to_string();
        let mut params = vec![("month", self.month.name())];
        if !self.search.is_empty() {
            params.push(("search", self.search.as_str()));
        }
        params.push(("page", page.as_str()));

        match serde_urlencoded::to_string(&params) {
            Ok(query) => format!("/?{}", query),
            Err(_) => "/".to_string(),
        }
    }
}

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub transactions: TransactionPage,
    pub statistics: Statistics,
    pub price_ranges: Vec<PriceRangeCount>,
}

impl DashboardData {
    /// Empty table, zeroed cards and an all-zero chart
    pub fn empty(query: &DashboardQuery) -> Self {
        Self {
            transactions: TransactionPage {
                products: Vec::new(),
                pagination: Pagination {
                    total: 0,
                    page: query.page,
                    per_page: ROWS_PER_PAGE,
                    total_pages: 0,
                },
            },
            statistics: Statistics::default(),
            price_ranges: PriceRange::ALL
                .iter()
                .map(|range| PriceRangeCount {
                    range: range.label,
                    count: 0,
                })
                .collect(),
        }
    }
}

/// Load dashboard data, falling back to the empty view on failure
pub async fn load_dashboard(queries: &QueryService, query: &DashboardQuery) -> DashboardData {
    let filter = query.to_filter();
    let result = tokio::try_join!(
        queries.list_transactions(&filter),
        queries.statistics(query.month),
        queries.price_range_distribution(query.month),
    );

    match result {
        Ok((transactions, statistics, price_ranges)) => DashboardData {
            transactions,
            statistics,
            price_ranges,
        },
        Err(e) => {
            tracing::error!("Error loading dashboard data: {:?}", e);
            DashboardData::empty(query)
        }
    }
}

/// Dashboard routes
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard_page))
}

/// GET / - render the dashboard
async fn dashboard_page(
    State(state): State<AppState>,
    params: Result<Query<DashboardParams>, QueryRejection>,
) -> Markup {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let query = DashboardQuery::from_params(&params);
    let data = load_dashboard(&state.queries, &query).await;

    views::dashboard_view(&query, &data)
}
