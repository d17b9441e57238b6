use super::Exchange;
use crate::errors::ExchangeError;
use crate::models::{FundingPoint, FundingRate};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://contract.mexc.com";

/// Envelope shared by every MEXC contract endpoint. `data` is absent
/// when the call fails, hence the Option.
#[derive(Debug, Deserialize)]
struct MexcResponse<T> {
    success: bool,
    code: i32,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ContractDetail {
    symbol: String,

    #[serde(rename = "quoteCoin")]
    quote_coin: String,

    #[serde(rename = "settleCoin")]
    settle_coin: String,

    // 0 = enabled, 1 = delivering, 2 = completed, 3 = offline, 4 = paused
    state: i32,
}

#[derive(Debug, Deserialize)]
struct MexcFundingRate {
    symbol: String,

    #[serde(rename = "fundingRate")]
    funding_rate: f64,

    #[serde(rename = "nextSettleTime")]
    next_settle_time: u64,
}

#[derive(Debug, Deserialize)]
struct FundingHistoryPage {
    #[serde(rename = "resultList")]
    result_list: Vec<MexcFundingEntry>,
}

#[derive(Debug, Deserialize)]
struct MexcFundingEntry {
    #[serde(rename = "fundingRate")]
    funding_rate: f64,

    #[serde(rename = "settleTime")]
    settle_time: u64,
}

pub struct Mexc {
    client: reqwest::Client,
}

impl Mexc {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ExchangeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .json::<MexcResponse<T>>()
            .await?;

        if !response.success {
            return Err(ExchangeError::UnexpectedData(format!(
                "MEXC error code {}",
                response.code
            )));
        }

        response.data.ok_or_else(|| {
            ExchangeError::UnexpectedData("MEXC response missing data field".to_string())
        })
    }
}

/// A MEXC contract is linear when it settles in its quote currency.
fn linear_symbols(contracts: Vec<ContractDetail>) -> Vec<String> {
    contracts
        .into_iter()
        .filter(|c| c.settle_coin == c.quote_coin && c.state == 0)
        .map(|c| c.symbol)
        .collect()
}

/// MEXC pages history newest first; flip it and scale to percent.
fn history_points(entries: Vec<MexcFundingEntry>) -> Vec<FundingPoint> {
    entries
        .into_iter()
        .rev()
        .map(|e| FundingPoint {
            timestamp_ms: e.settle_time,
            rate_pct: e.funding_rate * 100.0,
        })
        .collect()
}

#[async_trait]
impl Exchange for Mexc {
    fn name(&self) -> &'static str {
        "mexc"
    }

    async fn list_linear_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        let url = format!("{BASE_URL}/api/v1/contract/detail");

        let contracts: Vec<ContractDetail> = self.get(&url).await?;
        Ok(linear_symbols(contracts))
    }

    async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate, ExchangeError> {
        let url = format!("{BASE_URL}/api/v1/contract/funding_rate/{symbol}");

        let rate: MexcFundingRate = self.get(&url).await?;

        Ok(FundingRate {
            exchange: self.name(),
            symbol: rate.symbol,
            rate: rate.funding_rate,
            next_funding_ms: rate.next_settle_time,
        })
    }

    async fn fetch_funding_history(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<FundingPoint>, ExchangeError> {
        let url = format!(
            "{BASE_URL}/api/v1/contract/funding_rate/history?symbol={symbol}&page_num=1&page_size={limit}"
        );

        let page: FundingHistoryPage = self.get(&url).await?;
        Ok(history_points(page.result_list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_funding_rate_envelope() {
        let raw = r#"{
            "success": true,
            "code": 0,
            "data": {
                "symbol": "BTC_USDT",
                "fundingRate": 0.000083,
                "maxFundingRate": 0.003,
                "minFundingRate": -0.003,
                "collectCycle": 8,
                "nextSettleTime": 1700000000000,
                "timestamp": 1699999000000
            }
        }"#;

        let response: MexcResponse<MexcFundingRate> = serde_json::from_str(raw).unwrap();
        let data = response.data.unwrap();
        assert_eq!(data.symbol, "BTC_USDT");
        assert_eq!(data.funding_rate, 0.000083);
        assert_eq!(data.next_settle_time, 1700000000000);
    }

    #[test]
    fn linear_symbols_requires_stable_settlement_and_live_state() {
        let contracts = vec![
            ContractDetail {
                symbol: "BTC_USDT".to_string(),
                quote_coin: "USDT".to_string(),
                settle_coin: "USDT".to_string(),
                state: 0,
            },
            ContractDetail {
                symbol: "BTC_USD".to_string(),
                quote_coin: "USD".to_string(),
                settle_coin: "BTC".to_string(),
                state: 0,
            },
            ContractDetail {
                symbol: "GONE_USDT".to_string(),
                quote_coin: "USDT".to_string(),
                settle_coin: "USDT".to_string(),
                state: 3,
            },
        ];

        assert_eq!(linear_symbols(contracts), vec!["BTC_USDT".to_string()]);
    }

    #[test]
    fn history_points_are_oldest_first_and_in_percent() {
        let entries = vec![
            MexcFundingEntry {
                funding_rate: -0.0005,
                settle_time: 1700000200000,
            },
            MexcFundingEntry {
                funding_rate: 0.0001,
                settle_time: 1700000100000,
            },
        ];

        let points = history_points(entries);
        assert_eq!(
            points,
            vec![
                FundingPoint {
                    timestamp_ms: 1700000100000,
                    rate_pct: 0.01,
                },
                FundingPoint {
                    timestamp_ms: 1700000200000,
                    rate_pct: -0.05,
                },
            ]
        );
    }

    #[test]
    fn failed_envelope_surfaces_the_code() {
        let raw = r#"{"success": false, "code": 510}"#;
        let response: MexcResponse<MexcFundingRate> = serde_json::from_str(raw).unwrap();
        assert!(!response.success);
        assert_eq!(response.code, 510);
        assert!(response.data.is_none());
    }
}
