use crate::errors::ExchangeError;
use crate::models::{FundingPoint, FundingRate};
use async_trait::async_trait;

pub mod bybit;
pub mod mexc;

#[async_trait]
pub trait Exchange: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lists the symbols of every tradeable linear (stable-quote-settled)
    /// perpetual contract on this exchange.
    async fn list_linear_symbols(&self) -> Result<Vec<String>, ExchangeError>;

    async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate, ExchangeError>;

    /// Fetches up to `limit` historical funding settlements for a symbol,
    /// oldest first. An empty series is valid data.
    async fn fetch_funding_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<FundingPoint>, ExchangeError>;
}

/// Resolves an exchange by its lowercase name.
pub fn by_name(name: &str) -> Result<Box<dyn Exchange>, ExchangeError> {
    match name {
        "bybit" => Ok(Box::new(bybit::Bybit::new())),
        "mexc" => Ok(Box::new(mexc::Mexc::new())),
        other => Err(ExchangeError::UnknownExchange(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_resolves_known_exchanges() {
        assert_eq!(by_name("bybit").unwrap().name(), "bybit");
        assert_eq!(by_name("mexc").unwrap().name(), "mexc");
    }

    #[test]
    fn by_name_rejects_unknown_exchanges() {
        let Err(err) = by_name("kraken") else {
            panic!("expected an error for an unknown exchange");
        };
        assert!(matches!(err, ExchangeError::UnknownExchange(name) if name == "kraken"));
    }
}
