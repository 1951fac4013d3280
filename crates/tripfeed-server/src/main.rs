mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use tripfeed_places::{FeedAggregator, FeedPolicy, GooglePlacesClient};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = tripfeed_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cities = tripfeed_core::load_cities(&config.cities_path)?;
    tracing::info!(count = cities.cities.len(), "loaded city directory");

    let client = GooglePlacesClient::new(
        &config.google_api_key,
        config.places_request_timeout_secs,
        config.places_max_retries,
        config.places_retry_backoff_base_ms,
    )?;
    let policy = FeedPolicy {
        search_radius_m: config.feed_search_radius_m,
        popular_rating_threshold: config.feed_popular_rating_threshold,
        max_ai_candidates: config.ai_max_candidates,
        detail_concurrency: config.ai_detail_concurrency,
    };
    let aggregator = FeedAggregator::new(client, policy);

    let app = build_app(AppState {
        aggregator: Arc::new(aggregator),
        cities: Arc::new(cities),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "tripfeed server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
