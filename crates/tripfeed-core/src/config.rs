use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_api_key = require("GOOGLE_API_KEY")?;

    let env = parse_environment(&or_default("TRIPFEED_ENV", "development"));

    let bind_addr = parse_addr("TRIPFEED_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("TRIPFEED_LOG_LEVEL", "info");
    let cities_path = PathBuf::from(or_default("TRIPFEED_CITIES_PATH", "./config/cities.yaml"));

    let places_request_timeout_secs = parse_u64("TRIPFEED_PLACES_REQUEST_TIMEOUT_SECS", "30")?;
    let places_max_retries = parse_u32("TRIPFEED_PLACES_MAX_RETRIES", "3")?;
    let places_retry_backoff_base_ms = parse_u64("TRIPFEED_PLACES_RETRY_BACKOFF_BASE_MS", "1000")?;

    let feed_search_radius_m = parse_u32("TRIPFEED_FEED_SEARCH_RADIUS_M", "5000")?;
    let feed_popular_rating_threshold =
        parse_f64("TRIPFEED_FEED_POPULAR_RATING_THRESHOLD", "4.5")?;
    let ai_max_candidates = parse_usize("TRIPFEED_AI_MAX_CANDIDATES", "5")?;
    let ai_detail_concurrency = parse_usize("TRIPFEED_AI_DETAIL_CONCURRENCY", "3")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cities_path,
        google_api_key,
        places_request_timeout_secs,
        places_max_retries,
        places_retry_backoff_base_ms,
        feed_search_radius_m,
        feed_popular_rating_threshold,
        ai_max_candidates,
        ai_detail_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
