mod cli;
mod commands;
mod metrics;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abb_core::{
    load_config, validate_config, CacheStore, ExtractionCache, HttpPageFetcher, MemoryCacheStore,
    SqliteCacheStore,
};

use cli::Cli;
use commands::Session;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    let store: Arc<dyn CacheStore> = if cli.ephemeral {
        info!("Using in-memory cache");
        Arc::new(MemoryCacheStore::new())
    } else {
        info!("Cache path: {:?}", config.cache.path);
        Arc::new(
            SqliteCacheStore::new(&config.cache.path).context("Failed to open cache database")?,
        )
    };
    let cache = ExtractionCache::new(store);

    let fetcher =
        Arc::new(HttpPageFetcher::new(&config.site).context("Failed to create page fetcher")?);

    let mut session = Session::start(&config, fetcher, cache).await?;
    let result = session.execute(&cli.command, &mut std::io::stdout()).await;
    session.finish().await?;

    if cli.metrics {
        eprint!("{}", metrics::encode_metrics()?);
    }

    result
}
