mod api;
mod config;
mod errors;
mod exchanges;
mod models;
mod ranking;
mod service;
mod snapshot;

use config::Config;
use service::FundingService;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    tracing::info!(
        "Fundrank starting — exchanges: {:?}, top {} per snapshot, port {}",
        config.exchanges,
        config.top_n,
        config.api_port
    );

    let service = Arc::new(FundingService::new(config.clone())?);

    // ── 1. Background snapshot loop: warm the cache now, then once per TTL ──
    let refresher = Arc::clone(&service);
    let period = config.cache_ttl.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            refresher.refresh_all().await;
        }
    });

    // ── 2. Serve the JSON API until ctrl-c ──────────────────────────────────
    api::ApiServer::new(service).run(config).await
}
