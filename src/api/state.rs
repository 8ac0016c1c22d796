//! Shared application state

use std::sync::Arc;

use crate::query::QueryService;
use crate::seed::{SeedClient, SeedLoader};
use crate::store::TransactionStore;

/// State handed to every handler. Cheap to clone; holds no per-request data.
#[derive(Debug, Clone)]
pub struct AppState {
    pub queries: QueryService,
    pub seed: SeedLoader,
}

impl AppState {
    /// Wire the query service and seed loader to one store
    pub fn new(store: Arc<dyn TransactionStore>, seed_client: SeedClient) -> Self {
        Self {
            queries: QueryService::new(store.clone()),
            seed: SeedLoader::new(seed_client, store),
        }
    }
}
