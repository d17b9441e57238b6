use crate::models::{FundingPoint, SymbolRate};
use chrono::DateTime;
use serde::Serialize;

/// Response for GET /funding/{exchange}
#[derive(Serialize)]
pub struct FundingResponse {
    pub exchange: String,
    pub fetched_ms: i64,
    pub entries: Vec<RateEntry>,
}

#[derive(Serialize)]
pub struct RateEntry {
    pub symbol: String,
    pub rate: f64,
}

impl From<SymbolRate> for RateEntry {
    fn from(entry: SymbolRate) -> Self {
        Self {
            symbol: entry.symbol,
            rate: entry.rate,
        }
    }
}

/// Response for GET /funding/{exchange}/{symbol}/history
#[derive(Serialize)]
pub struct HistoryResponse {
    pub exchange: String,
    pub symbol: String,
    pub points: Vec<HistoryPoint>,
}

#[derive(Serialize)]
pub struct HistoryPoint {
    pub timestamp_ms: u64,
    pub datetime: String,
    pub rate_pct: f64,
}

impl From<FundingPoint> for HistoryPoint {
    fn from(point: FundingPoint) -> Self {
        let datetime = DateTime::from_timestamp_millis(point.timestamp_ms as i64)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        Self {
            timestamp_ms: point.timestamp_ms,
            datetime,
            rate_pct: point.rate_pct,
        }
    }
}
