//! Place-search provider client and feed aggregation.

pub mod client;
pub mod detail;
pub mod error;
pub mod feed;
pub mod links;
pub mod provider;
mod retry;
pub mod types;

pub use client::GooglePlacesClient;
pub use detail::{DetailMode, PlaceDetail, ReviewSummary};
pub use error::PlacesError;
pub use feed::{Feed, FeedAggregator, FeedPolicy, PlaceSummary};
pub use provider::PlaceProvider;
pub use types::Rating;
