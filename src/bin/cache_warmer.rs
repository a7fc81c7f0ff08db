//! Cache Warmer - seeds a running cache server with random records
//!
//! Prints one `GET <url>` line per accepted record on stdout; logs go to
//! stderr.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ring_cache::warmer::seed;
use ring_cache::WarmerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ring_cache=info,cache_warmer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WarmerConfig::from_env().context("Invalid warmer configuration")?;
    info!(
        "Warming {} with {} records, concurrency {}",
        config.url, config.records, config.concurrency
    );

    let client = reqwest::Client::new();
    let accepted = seed(&client, &config.url, config.records, config.concurrency)
        .await
        .context("Cache warming aborted")?;

    info!("Done: {} records accepted", accepted);
    Ok(())
}
