pub mod store;

pub use store::SnapshotStore;

use crate::errors::ExchangeError;
use crate::exchanges::Exchange;
use crate::models::SymbolRate;
use chrono::Utc;

/// A flat symbol → rate snapshot of one exchange's linear perpetuals,
/// in listing order.
#[derive(Debug, Clone)]
pub struct FundingSnapshot {
    pub exchange: &'static str,
    pub entries: Vec<SymbolRate>,
    pub fetched_ms: i64,
}

/// Lists an exchange's linear symbols and fetches the current funding rate
/// for each. A failed listing is fatal; a failed per-symbol fetch is logged
/// and the symbol skipped, so one delisting mid-snapshot cannot sink the rest.
pub async fn fetch_all_funding_rates(
    exchange: &dyn Exchange,
) -> Result<FundingSnapshot, ExchangeError> {
    let name = exchange.name();
    let symbols = exchange.list_linear_symbols().await?;

    tracing::info!("[{name}] snapshotting funding rates for {} symbols", symbols.len());

    let mut entries = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        match exchange.fetch_funding_rate(&symbol).await {
            Ok(fr) => {
                tracing::debug!(
                    "[{}] {} rate {:.6}, next funding at {}",
                    fr.exchange,
                    fr.symbol,
                    fr.rate,
                    fr.next_funding_ms
                );
                entries.push(SymbolRate {
                    symbol: fr.symbol,
                    rate: fr.rate,
                });
            }
            Err(e) => tracing::warn!("[{name}] skipping {symbol}: {e}"),
        }
    }

    Ok(FundingSnapshot {
        exchange: name,
        entries,
        fetched_ms: Utc::now().timestamp_millis(),
    })
}
