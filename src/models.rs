#[derive(Debug, Clone)]
pub struct FundingRate {
    pub exchange: &'static str,
    pub symbol: String,
    pub rate: f64,
    pub next_funding_ms: u64,
}

/// One historical funding settlement. `rate_pct` is the raw exchange
/// rate scaled to a percentage (0.0001 → 0.01).
#[derive(Debug, Clone, PartialEq)]
pub struct FundingPoint {
    pub timestamp_ms: u64,
    pub rate_pct: f64,
}

/// A (symbol, current rate) pair inside a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRate {
    pub symbol: String,
    pub rate: f64,
}
