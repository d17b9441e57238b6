use crate::models::FundingPoint;
use crate::snapshot::FundingSnapshot;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

/// Time-bounded cache for funding snapshots and history series.
/// Entries older than the TTL read as absent and get overwritten
/// by the next fetch.
#[derive(Clone)]
pub struct SnapshotStore {
    ttl: Duration,
    snapshots: Arc<DashMap<String, Cached<FundingSnapshot>>>,
    histories: Arc<DashMap<String, Cached<Vec<FundingPoint>>>>,
}

impl SnapshotStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshots: Arc::new(DashMap::new()),
            histories: Arc::new(DashMap::new()),
        }
    }

    /// Key format e.g.: "bybit:BTCUSDT"
    fn history_key(exchange: &str, symbol: &str) -> String {
        format!("{}:{}", exchange, symbol)
    }

    fn is_fresh<T>(&self, cached: &Cached<T>) -> bool {
        cached.fetched_at.elapsed() < self.ttl
    }

    pub fn put_snapshot(&self, snapshot: FundingSnapshot) {
        self.snapshots.insert(
            snapshot.exchange.to_string(),
            Cached {
                value: snapshot,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn get_snapshot(&self, exchange: &str) -> Option<FundingSnapshot> {
        self.snapshots
            .get(exchange)
            .filter(|c| self.is_fresh(c))
            .map(|c| c.value.clone())
    }

    pub fn put_history(&self, exchange: &str, symbol: &str, points: Vec<FundingPoint>) {
        self.histories.insert(
            Self::history_key(exchange, symbol),
            Cached {
                value: points,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn get_history(&self, exchange: &str, symbol: &str) -> Option<Vec<FundingPoint>> {
        self.histories
            .get(&Self::history_key(exchange, symbol))
            .filter(|c| self.is_fresh(c))
            .map(|c| c.value.clone())
    }
}
