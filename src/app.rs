//! Application wiring
//!
//! Store selection and the HTTP router shared by the binaries and tests.

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::{Config, ConfigError, StoreBackend};
use crate::dashboard;
use crate::db;
use crate::error::AppError;
use crate::store::{InMemoryTransactionStore, PgTransactionStore, StoreError, TransactionStore};

/// A ready transaction store, plus its pool when backed by Postgres
pub struct OpenedStore {
    pub store: Arc<dyn TransactionStore>,
    pub pool: Option<PgPool>,
}

/// Open the store selected by `config.store_backend`.
///
/// # Errors
///
/// Fails if Postgres is unreachable or the `product_transactions` table is
/// missing.
pub async fn open_store(config: &Config) -> Result<OpenedStore, AppError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory transaction store; data is lost on restart");
            Ok(OpenedStore {
                store: Arc::new(InMemoryTransactionStore::new()),
                pool: None,
            })
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or(ConfigError::MissingEnv("DATABASE_URL"))?;

            tracing::info!("Connecting to database...");
            let pool = db::connect(database_url, config.database_max_connections)
                .await
                .map_err(StoreError::from)?;
            db::verify_connection(&pool)
                .await
                .map_err(StoreError::from)?;

            if !db::check_schema(&pool).await.map_err(StoreError::from)? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(AppError::Internal("Database schema incomplete".to_string()));
            }
            tracing::info!("Database connected successfully");

            Ok(OpenedStore {
                store: Arc::new(PgTransactionStore::new(pool.clone())),
                pool: Some(pool),
            })
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    // Layers run outermost-last: trace -> logging -> handler
    let router = Router::new()
        .route("/health", get(health_check))
        .merge(dashboard::router())
        .nest("/api", api::create_router())
        .layer(middleware::from_fn(api::middleware::logging_middleware))
        .layer(TraceLayer::new_for_http());

    let router = if config.is_production() {
        router
    } else {
        router.layer(CorsLayer::permissive())
    };

    router.with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
