//! Seed loader CLI
//!
//! Replaces every stored product transaction with the remote feed, the same
//! way `POST /api/initialize` does.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transaction_dashboard::config::StoreBackend;
use transaction_dashboard::seed::{SeedClient, SeedLoader};
use transaction_dashboard::{open_store, Config};

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Load the product transaction feed into the store")]
struct Args {
    /// Feed URL (defaults to SEED_URL)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (defaults to SEED_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transaction_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    if config.store_backend == StoreBackend::Memory {
        tracing::warn!("STORE_BACKEND=memory: seeded data will not outlive this process");
    }

    let url = args.url.unwrap_or_else(|| config.seed_url.clone());
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(config.seed_timeout_secs));

    let opened = open_store(&config).await?;
    let loader = SeedLoader::new(SeedClient::new(url, timeout)?, opened.store);

    let outcome = loader.run().await?;
    println!("Database initialized with seed data: {} records", outcome.count);

    if let Some(pool) = opened.pool {
        pool.close().await;
    }

    Ok(())
}
