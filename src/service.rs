use crate::config::Config;
use crate::errors::ExchangeError;
use crate::exchanges::{self, Exchange};
use crate::models::FundingPoint;
use crate::ranking;
use crate::snapshot::{self, FundingSnapshot, SnapshotStore};
use std::collections::HashMap;

/// Ties the exchange registry, the TTL store, and the ranking step together.
/// Shared by the API handlers and the background refresh loop.
pub struct FundingService {
    config: Config,
    store: SnapshotStore,
    exchanges: HashMap<&'static str, Box<dyn Exchange>>,
}

impl FundingService {
    pub fn new(config: Config) -> Result<Self, ExchangeError> {
        let mut built = Vec::with_capacity(config.exchanges.len());
        for name in &config.exchanges {
            built.push(exchanges::by_name(name)?);
        }
        Ok(Self::with_exchanges(config, built))
    }

    fn with_exchanges(config: Config, built: Vec<Box<dyn Exchange>>) -> Self {
        let store = SnapshotStore::new(config.cache_ttl);
        let exchanges = built.into_iter().map(|ex| (ex.name(), ex)).collect();
        Self {
            config,
            store,
            exchanges,
        }
    }

    fn exchange(&self, name: &str) -> Result<&dyn Exchange, ExchangeError> {
        self.exchanges
            .get(name)
            .map(|ex| ex.as_ref())
            .ok_or_else(|| ExchangeError::UnknownExchange(name.to_string()))
    }

    /// Cached full snapshot for one exchange, re-fetched past the TTL.
    async fn snapshot(&self, name: &str) -> Result<FundingSnapshot, ExchangeError> {
        let exchange = self.exchange(name)?;

        if let Some(cached) = self.store.get_snapshot(name) {
            return Ok(cached);
        }

        let snap = snapshot::fetch_all_funding_rates(exchange).await?;
        self.store.put_snapshot(snap.clone());
        Ok(snap)
    }

    /// Top-`top` funding rates for one exchange, rate descending.
    /// `top` falls back to the configured default.
    pub async fn ranked(
        &self,
        name: &str,
        top: Option<usize>,
    ) -> Result<FundingSnapshot, ExchangeError> {
        let n = top.unwrap_or(self.config.top_n);
        let FundingSnapshot {
            exchange,
            entries,
            fetched_ms,
        } = self.snapshot(name).await?;

        Ok(FundingSnapshot {
            exchange,
            entries: ranking::top_n(entries, n),
            fetched_ms,
        })
    }

    /// Cached funding history for one symbol, oldest first.
    pub async fn history(
        &self,
        name: &str,
        symbol: &str,
    ) -> Result<Vec<FundingPoint>, ExchangeError> {
        let exchange = self.exchange(name)?;

        if let Some(cached) = self.store.get_history(name, symbol) {
            return Ok(cached);
        }

        let points = exchange
            .fetch_funding_history(symbol, self.config.history_limit)
            .await?;
        self.store.put_history(name, symbol, points.clone());
        Ok(points)
    }

    /// Unconditional re-fetch for the background loop. Going through the
    /// freshness check instead would leave the entry stamped just under a
    /// TTL old at the next tick, so every second pass would be a no-op.
    async fn resnapshot(&self, name: &str) -> Result<FundingSnapshot, ExchangeError> {
        let exchange = self.exchange(name)?;
        let snap = snapshot::fetch_all_funding_rates(exchange).await?;
        self.store.put_snapshot(snap.clone());
        Ok(snap)
    }

    /// One pass of the background loop: re-snapshot every configured
    /// exchange and log the current leaders.
    pub async fn refresh_all(&self) {
        for name in &self.config.exchanges {
            match self.resnapshot(name).await {
                Ok(snap) => {
                    let leaders = ranking::top_n(snap.entries, self.config.top_n);
                    tracing::info!("=== [{}] TOP FUNDING RATES ===", snap.exchange);
                    for entry in leaders.iter().take(5) {
                        tracing::info!(
                            "[{}] {}: {:.4}%",
                            snap.exchange,
                            entry.symbol,
                            entry.rate * 100.0
                        );
                    }
                }
                Err(e) => tracing::error!("[{name}] snapshot failed: {e}"),
            }
        }
    }
}
