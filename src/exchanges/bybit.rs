use super::Exchange;
use crate::errors::ExchangeError;
use crate::models::{FundingPoint, FundingRate};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.bybit.com";

/// Envelope shared by every Bybit v5 endpoint.
#[derive(Debug, Deserialize)]
struct BybitResponse<T> {
    #[serde(rename = "retCode")]
    ret_code: i32,

    #[serde(rename = "retMsg", default)]
    ret_msg: String,

    result: T,
}

#[derive(Debug, Deserialize)]
struct InstrumentsResult {
    list: Vec<BybitInstrument>,

    #[serde(rename = "nextPageCursor", default)]
    next_page_cursor: String,
}

#[derive(Debug, Deserialize)]
struct BybitInstrument {
    symbol: String,

    #[serde(rename = "contractType")]
    contract_type: String,

    status: String,
}

#[derive(Debug, Deserialize)]
struct TickersResult {
    list: Vec<BybitTicker>,
}

#[derive(Debug, Deserialize)]
struct BybitTicker {
    symbol: String,

    #[serde(rename = "fundingRate")]
    funding_rate: String,

    #[serde(rename = "nextFundingTime")]
    next_funding_time: String,
}

#[derive(Debug, Deserialize)]
struct FundingHistoryResult {
    list: Vec<BybitFundingEntry>,
}

#[derive(Debug, Deserialize)]
struct BybitFundingEntry {
    #[serde(rename = "fundingRate")]
    funding_rate: String,

    #[serde(rename = "fundingRateTimestamp")]
    funding_rate_timestamp: String,
}

pub struct Bybit {
    client: reqwest::Client,
}

impl Bybit {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Bybit signals errors via retCode, not just HTTP status.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ExchangeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .json::<BybitResponse<T>>()
            .await?;

        if response.ret_code != 0 {
            return Err(ExchangeError::UnexpectedData(format!(
                "Bybit retCode {}: {}",
                response.ret_code, response.ret_msg
            )));
        }

        Ok(response.result)
    }
}

/// Keeps only live linear perpetuals; dated futures and delisted
/// contracts also show up under category=linear.
fn linear_symbols(instruments: Vec<BybitInstrument>) -> Vec<String> {
    instruments
        .into_iter()
        .filter(|i| i.contract_type == "LinearPerpetual" && i.status == "Trading")
        .map(|i| i.symbol)
        .collect()
}

/// Bybit returns history newest first; flip it and scale to percent.
fn history_points(entries: Vec<BybitFundingEntry>) -> Result<Vec<FundingPoint>, ExchangeError> {
    let mut points = Vec::with_capacity(entries.len());

    for entry in entries.into_iter().rev() {
        let rate = entry
            .funding_rate
            .parse::<f64>()
            .map_err(|e| ExchangeError::UnexpectedData(e.to_string()))?;
        let timestamp_ms = entry
            .funding_rate_timestamp
            .parse::<u64>()
            .map_err(|e| ExchangeError::UnexpectedData(e.to_string()))?;

        points.push(FundingPoint {
            timestamp_ms,
            rate_pct: rate * 100.0,
        });
    }

    Ok(points)
}

#[async_trait]
impl Exchange for Bybit {
    fn name(&self) -> &'static str {
        "bybit"
    }

    /// Pages through the instruments-info endpoint until the cursor runs out.
    async fn list_linear_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        let mut symbols = Vec::new();
        let mut cursor = String::new();

        loop {
            let url = if cursor.is_empty() {
                format!("{BASE_URL}/v5/market/instruments-info?category=linear&limit=1000")
            } else {
                format!(
                    "{BASE_URL}/v5/market/instruments-info?category=linear&limit=1000&cursor={cursor}"
                )
            };

            let result: InstrumentsResult = self.get(&url).await?;
            symbols.extend(linear_symbols(result.list));

            if result.next_page_cursor.is_empty() {
                break;
            }
            cursor = result.next_page_cursor;
        }

        Ok(symbols)
    }

    async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate, ExchangeError> {
        let url = format!("{BASE_URL}/v5/market/tickers?category=linear&symbol={symbol}");

        let result: TickersResult = self.get(&url).await?;

        // list always has one item when querying by symbol
        let ticker = result.list.into_iter().next().ok_or_else(|| {
            ExchangeError::UnexpectedData(format!("Bybit returned empty list for {}", symbol))
        })?;

        let rate = ticker
            .funding_rate
            .parse::<f64>()
            .map_err(|e| ExchangeError::UnexpectedData(e.to_string()))?;

        let next_funding_ms = ticker
            .next_funding_time
            .parse::<u64>()
            .map_err(|e| ExchangeError::UnexpectedData(e.to_string()))?;

        Ok(FundingRate {
            exchange: self.name(),
            symbol: ticker.symbol,
            rate,
            next_funding_ms,
        })
    }

    async fn fetch_funding_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<FundingPoint>, ExchangeError> {
        let url = format!(
            "{BASE_URL}/v5/market/funding/history?category=linear&symbol={symbol}&limit={limit}"
        );

        let result: FundingHistoryResult = self.get(&url).await?;
        history_points(result.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ticker_envelope() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "list": [
                    {
                        "symbol": "BTCUSDT",
                        "fundingRate": "0.0001",
                        "nextFundingTime": "1700000000000"
                    }
                ]
            }
        }"#;

        let response: BybitResponse<TickersResult> = serde_json::from_str(raw).unwrap();
        assert_eq!(response.ret_code, 0);
        assert_eq!(response.result.list[0].symbol, "BTCUSDT");
        assert_eq!(response.result.list[0].funding_rate, "0.0001");
    }

    #[test]
    fn linear_symbols_drops_futures_and_delisted() {
        let instruments = vec![
            BybitInstrument {
                symbol: "BTCUSDT".to_string(),
                contract_type: "LinearPerpetual".to_string(),
                status: "Trading".to_string(),
            },
            BybitInstrument {
                symbol: "BTC-29NOV26".to_string(),
                contract_type: "LinearFutures".to_string(),
                status: "Trading".to_string(),
            },
            BybitInstrument {
                symbol: "OLDUSDT".to_string(),
                contract_type: "LinearPerpetual".to_string(),
                status: "Closed".to_string(),
            },
        ];

        assert_eq!(linear_symbols(instruments), vec!["BTCUSDT".to_string()]);
    }

    #[test]
    fn history_points_are_oldest_first_and_in_percent() {
        let entries = vec![
            BybitFundingEntry {
                funding_rate: "0.0002".to_string(),
                funding_rate_timestamp: "1700000200000".to_string(),
            },
            BybitFundingEntry {
                funding_rate: "0.0001".to_string(),
                funding_rate_timestamp: "1700000100000".to_string(),
            },
        ];

        let points = history_points(entries).unwrap();
        assert_eq!(
            points,
            vec![
                FundingPoint {
                    timestamp_ms: 1700000100000,
                    rate_pct: 0.01,
                },
                FundingPoint {
                    timestamp_ms: 1700000200000,
                    rate_pct: 0.02,
                },
            ]
        );
    }

    #[test]
    fn bad_rate_string_is_an_error() {
        let entries = vec![BybitFundingEntry {
            funding_rate: "not-a-number".to_string(),
            funding_rate_timestamp: "1700000100000".to_string(),
        }];

        assert!(matches!(
            history_points(entries),
            Err(ExchangeError::UnexpectedData(_))
        ));
    }

    /// Hits the live Bybit API. Run with: cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn live_listing_is_nonempty() {
        let symbols = Bybit::new().list_linear_symbols().await.unwrap();
        assert!(symbols.iter().any(|s| s == "BTCUSDT"));
    }
}
