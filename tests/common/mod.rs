//! Common test utilities

#![allow(dead_code)]

use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;

use transaction_dashboard::api::AppState;
use transaction_dashboard::seed::SeedClient;
use transaction_dashboard::store::InMemoryTransactionStore;
use transaction_dashboard::{build_router, Config, ProductTransaction};

/// Serializes tests that share the `product_transactions` table
pub static DB_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Setup test database - apply the schema and empty the table
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::query(include_str!("../../migrations/0001_create_product_transactions.sql"))
        .execute(&pool)
        .await
        .expect("Failed to apply schema");

    sqlx::query("TRUNCATE TABLE product_transactions RESTART IDENTITY")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}

/// Feed URL used when a test never seeds
pub const UNUSED_SEED_URL: &str = "http://127.0.0.1:9/feed";

pub fn record(
    id: i64,
    title: &str,
    category: &str,
    price: Decimal,
    sold: bool,
    (year, month, day): (i32, u32, u32),
) -> ProductTransaction {
    ProductTransaction {
        id,
        title: title.to_string(),
        description: format!("{} description", title),
        category: category.to_string(),
        price,
        sold,
        image: format!("https://example.test/img/{}.jpg", id),
        date_of_sale: Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap(),
    }
}

/// Ten fixed records.
///
/// March holds ids 1-5 across two years: three sold (50 + 150 + 950 = 1150)
/// and two unsold (300 and 20).
pub fn sample_records() -> Vec<ProductTransaction> {
    vec![
        record(1, "Laptop bag", "electronics", Decimal::new(50, 0), true, (2021, 3, 10)),
        record(2, "Silver ring", "jewelery", Decimal::new(150, 0), true, (2022, 3, 15)),
        record(3, "Gaming monitor", "electronics", Decimal::new(950, 0), true, (2021, 3, 20)),
        record(4, "Cotton jacket", "men's clothing", Decimal::new(300, 0), false, (2022, 3, 5)),
        record(5, "Summer shirt", "women's clothing", Decimal::new(20, 0), false, (2021, 3, 25)),
        record(6, "USB cable", "electronics", Decimal::new(120, 0), true, (2021, 6, 1)),
        record(7, "Gold necklace", "jewelery", Decimal::new(7550, 2), false, (2022, 6, 12)),
        record(8, "Leather boots", "men's clothing", Decimal::new(600, 0), true, (2021, 11, 30)),
        record(9, "Rain jacket", "women's clothing", Decimal::new(45, 0), true, (2022, 1, 2)),
        record(10, "Smart TV", "electronics", Decimal::new(999, 0), false, (2021, 12, 24)),
    ]
}

/// Development config on the in-memory backend
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Full application router over `store`, seeding from `seed_url`
pub fn app_with_store(store: InMemoryTransactionStore, seed_url: &str) -> Router {
    let seed_client = SeedClient::new(seed_url, Duration::from_secs(5)).unwrap();
    let state = AppState::new(std::sync::Arc::new(store), seed_client);
    build_router(state, &test_config())
}

/// Application router pre-loaded with [`sample_records`]
pub fn sample_app() -> Router {
    app_with_store(
        InMemoryTransactionStore::with_records(sample_records()),
        UNUSED_SEED_URL,
    )
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
