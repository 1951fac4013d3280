use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cities_path: PathBuf,
    pub google_api_key: String,
    pub places_request_timeout_secs: u64,
    pub places_max_retries: u32,
    pub places_retry_backoff_base_ms: u64,
    pub feed_search_radius_m: u32,
    pub feed_popular_rating_threshold: f64,
    pub ai_max_candidates: usize,
    pub ai_detail_concurrency: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cities_path", &self.cities_path)
            .field("google_api_key", &"[redacted]")
            .field(
                "places_request_timeout_secs",
                &self.places_request_timeout_secs,
            )
            .field("places_max_retries", &self.places_max_retries)
            .field(
                "places_retry_backoff_base_ms",
                &self.places_retry_backoff_base_ms,
            )
            .field("feed_search_radius_m", &self.feed_search_radius_m)
            .field(
                "feed_popular_rating_threshold",
                &self.feed_popular_rating_threshold,
            )
            .field("ai_max_candidates", &self.ai_max_candidates)
            .field("ai_detail_concurrency", &self.ai_detail_concurrency)
            .finish()
    }
}
