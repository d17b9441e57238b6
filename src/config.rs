use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub exchanges: Vec<String>,
    pub top_n: usize,
    pub cache_ttl: Duration,
    pub history_limit: u32,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        // default to the two exchanges the dashboard originally offered
        let exchanges = parse_exchange_list(
            &env::var("EXCHANGES").unwrap_or_else(|_| "bybit,mexc".to_string()),
        );

        let top_n = env::var("TOP_N")
            .unwrap_or_else(|_| "20".to_string())
            .parse::<usize>()
            .expect("TOP_N must be a non-negative integer");

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "600".to_string())
            .parse::<u64>()
            .expect("CACHE_TTL_SECS must be a number of seconds");

        let history_limit = env::var("HISTORY_LIMIT")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .expect("HISTORY_LIMIT must be a non-negative integer");

        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("API_PORT must be a valid port number (1-65535)");

        Self {
            exchanges,
            top_n,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            history_limit,
            api_port,
        }
    }
}

fn parse_exchange_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
