use anyhow::Context;
use clap::{Parser, Subcommand};

use tripfeed_core::GeoPoint;
use tripfeed_places::{DetailMode, FeedAggregator, FeedPolicy, GooglePlacesClient};

#[derive(Debug, Parser)]
#[command(name = "tripfeed-cli")]
#[command(about = "Tripfeed command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the popular/recommended feed for a city.
    Feed {
        /// City name from the cities file.
        #[arg(long)]
        city: String,
        /// Comma-separated interest keywords.
        #[arg(long, value_delimiter = ',')]
        interests: Vec<String>,
        /// Keep interest-then-provider ordering instead of shuffling.
        #[arg(long)]
        no_shuffle: bool,
    },
    /// Collect and enrich the AI candidate set for a set of keywords.
    Candidates {
        /// City name from the cities file.
        #[arg(long)]
        city: String,
        /// Comma-separated search phrases.
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
        /// Override the candidate cap.
        #[arg(long)]
        max: Option<usize>,
    },
    /// Fetch one place's detail payload.
    Detail {
        place_id: String,
        /// Field-inclusion mode: full, ai, or saved.
        #[arg(long, default_value = "full")]
        mode: DetailMode,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = tripfeed_core::load_app_config_from_env()?;

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

    match cli.command {
        Commands::Feed {
            city,
            interests,
            no_shuffle,
        } => {
            anyhow::ensure!(!interests.is_empty(), "--interests must not be empty");
            let (name, location) = resolve_city(&config, &city)?;
            let feed = aggregator
                .build_feed(&name, location, &interests, !no_shuffle)
                .await?;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
        Commands::Candidates {
            city,
            keywords,
            max,
        } => {
            anyhow::ensure!(!keywords.is_empty(), "--keywords must not be empty");
            let (name, location) = resolve_city(&config, &city)?;
            let max_candidates = max.unwrap_or(config.ai_max_candidates);
            let candidates = aggregator
                .build_ai_candidate_set(&name, location, &keywords, max_candidates)
                .await?;
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        }
        Commands::Detail {
            place_id,
            mode,
            tag,
            city,
        } => {
            let detail = aggregator
                .fetch_place_detail(&place_id, tag.as_deref(), city.as_deref(), mode)
                .await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
    }

    Ok(())
}

/// Resolves a city name to its canonical name and search origin.
fn resolve_city(
    config: &tripfeed_core::AppConfig,
    city: &str,
) -> anyhow::Result<(String, GeoPoint)> {
    let cities = tripfeed_core::load_cities(&config.cities_path)
        .with_context(|| format!("loading cities from {}", config.cities_path.display()))?;
    let entry = cities
        .find(city)
        .with_context(|| format!("unknown city '{city}'"))?;
    Ok((entry.name.clone(), entry.location()))
}
