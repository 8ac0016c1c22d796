//! PostgreSQL store integration tests
//!
//! Need a database: set `DATABASE_URL` and run `cargo test -- --ignored`.

use std::sync::{Arc, MutexGuard};
use std::time::Duration;

use chrono::{Month, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transaction_dashboard::domain::{SearchTerm, MONTHS};
use transaction_dashboard::query::QueryService;
use transaction_dashboard::seed::{SeedClient, SeedLoader};
use transaction_dashboard::store::{PgTransactionStore, TransactionStore};
use transaction_dashboard::{ProductTransaction, TransactionFilter};

mod common;

fn lock_db() -> MutexGuard<'static, ()> {
    common::DB_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn seeded_store(records: Vec<ProductTransaction>) -> PgTransactionStore {
    let store = PgTransactionStore::new(common::setup_test_db().await);
    store.replace_all(records).await.unwrap();
    store
}

fn month_filter(month: Month) -> TransactionFilter {
    TransactionFilter {
        month: Some(month),
        ..TransactionFilter::default()
    }
}

fn search_filter(term: &str) -> TransactionFilter {
    TransactionFilter {
        search: SearchTerm::parse(term),
        ..TransactionFilter::default()
    }
}

async fn page_ids(store: &PgTransactionStore, filter: &TransactionFilter) -> Vec<i64> {
    store
        .find_page(filter)
        .await
        .unwrap()
        .iter()
        .map(|record| record.id)
        .collect()
}

fn march(id: i64, title: &str, category: &str, price: Decimal) -> ProductTransaction {
    common::record(id, title, category, price, true, (2022, 3, 10))
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_month_totals_agree_for_every_month() {
    let _guard = lock_db();
    let store = seeded_store(common::sample_records()).await;

    for month in MONTHS {
        let total = store.count_matching(&month_filter(month)).await.unwrap();

        let summary = store.month_summary(month).await.unwrap();
        assert_eq!(summary.sold_items + summary.not_sold_items, total, "{:?}", month);

        let buckets = store.price_range_counts(month).await.unwrap();
        assert_eq!(buckets.iter().sum::<u64>(), total, "{:?}", month);

        let categories = store.category_counts(month).await.unwrap();
        assert_eq!(categories.iter().map(|(_, n)| n).sum::<u64>(), total, "{:?}", month);
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_month_summary_sums_sold_prices_across_years() {
    let _guard = lock_db();
    let store = seeded_store(common::sample_records()).await;

    let summary = store.month_summary(Month::March).await.unwrap();
    assert_eq!(summary.total_sale_amount, dec!(1150));
    assert_eq!(summary.sold_items, 3);
    assert_eq!(summary.not_sold_items, 2);

    let empty = store.month_summary(Month::August).await.unwrap();
    assert_eq!(empty.total_sale_amount, Decimal::ZERO);
    assert_eq!(empty.sold_items, 0);
    assert_eq!(empty.not_sold_items, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_month_is_matched_in_utc() {
    let _guard = lock_db();
    let mut late_march = march(1, "Late", "misc", dec!(10));
    // 2022-03-31T23:30:00-05:00
    late_march.date_of_sale = Utc.with_ymd_and_hms(2022, 4, 1, 4, 30, 0).unwrap();
    let mut early_march = march(2, "Early", "misc", dec!(10));
    early_march.date_of_sale = Utc.with_ymd_and_hms(2021, 3, 1, 0, 30, 0).unwrap();
    let store = seeded_store(vec![late_march, early_march]).await;

    assert_eq!(page_ids(&store, &month_filter(Month::March)).await, vec![2]);
    assert_eq!(page_ids(&store, &month_filter(Month::April)).await, vec![1]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_price_buckets_are_right_closed() {
    let _guard = lock_db();
    let store = seeded_store(vec![
        march(1, "A", "misc", dec!(100)),
        march(2, "B", "misc", dec!(100.5)),
        march(3, "C", "misc", dec!(200)),
        march(4, "D", "misc", dec!(900)),
        march(5, "E", "misc", dec!(900.01)),
        march(6, "F", "misc", dec!(0)),
    ])
    .await;

    let counts = store.price_range_counts(Month::March).await.unwrap();
    assert_eq!(counts, [2, 2, 0, 0, 0, 0, 0, 0, 1, 1]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_category_ties_sorted_by_name() {
    let _guard = lock_db();
    let store = seeded_store(vec![
        march(1, "A", "gamma", dec!(1)),
        march(2, "B", "alpha", dec!(1)),
        march(3, "C", "beta", dec!(1)),
        march(4, "D", "gamma", dec!(1)),
        march(5, "E", "beta", dec!(1)),
    ])
    .await;

    let counts = store.category_counts(Month::March).await.unwrap();
    assert_eq!(
        counts,
        vec![
            ("beta".to_string(), 2),
            ("gamma".to_string(), 2),
            ("alpha".to_string(), 1),
        ]
    );

    let queries = QueryService::new(Arc::new(store));
    let distribution = queries.category_distribution(Month::March).await.unwrap();
    let names: Vec<&str> = distribution.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["beta", "gamma", "alpha"]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_search_escapes_wildcards_and_matches_price() {
    let _guard = lock_db();
    let store = seeded_store(vec![
        march(1, "100% cotton", "clothing", dec!(10)),
        march(2, "1000 cotton tee", "clothing", dec!(20)),
        march(3, "Plain mug", "kitchen", dec!(19.999)),
        march(4, "Free sticker", "misc", dec!(0)),
    ])
    .await;

    assert_eq!(page_ids(&store, &search_filter("100%")).await, vec![1]);
    // Non-numeric terms also match the zero-priced record
    assert_eq!(page_ids(&store, &search_filter("COTTON")).await, vec![1, 2, 4]);
    assert_eq!(page_ids(&store, &search_filter("20 pack")).await, vec![2]);
    assert_eq!(page_ids(&store, &search_filter("9e99")).await, Vec::<i64>::new());

    let exact = store.find_page(&search_filter("19.999")).await.unwrap();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].price, dec!(19.999));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_page_keeps_feed_order() {
    let _guard = lock_db();
    let store = seeded_store(common::sample_records()).await;

    let filter = TransactionFilter {
        month: Some(Month::March),
        page: 2,
        per_page: 2,
        search: None,
    };
    assert_eq!(page_ids(&store, &filter).await, vec![3, 4]);
    assert_eq!(store.count_matching(&filter).await.unwrap(), 5);

    let past_end = TransactionFilter { page: 4, ..filter };
    assert!(page_ids(&store, &past_end).await.is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_all_replaces_in_chunks() {
    let _guard = lock_db();
    let store = seeded_store(common::sample_records()).await;

    let many: Vec<ProductTransaction> = (1..=2500)
        .map(|id| common::record(id, "Bulk item", "bulk", dec!(5), id % 2 == 0, (2021, 5, 1)))
        .collect();
    assert_eq!(store.replace_all(many).await.unwrap(), 2500);
    assert_eq!(store.count_matching(&TransactionFilter::default()).await.unwrap(), 2500);

    let few: Vec<ProductTransaction> = common::sample_records().into_iter().take(3).collect();
    assert_eq!(store.replace_all(few).await.unwrap(), 3);
    assert_eq!(page_ids(&store, &TransactionFilter::default()).await, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_seeding_twice_does_not_duplicate() {
    let _guard = lock_db();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_records()))
        .mount(&server)
        .await;

    let store = PgTransactionStore::new(common::setup_test_db().await);
    let client = SeedClient::new(format!("{}/feed", server.uri()), Duration::from_secs(5)).unwrap();
    let loader = SeedLoader::new(client, Arc::new(store.clone()));

    assert_eq!(loader.run().await.unwrap().count, 10);
    assert_eq!(loader.run().await.unwrap().count, 10);

    assert_eq!(store.count_matching(&TransactionFilter::default()).await.unwrap(), 10);
    let stored = store.find_page(&TransactionFilter::default()).await.unwrap();
    assert_eq!(stored, common::sample_records());
}
