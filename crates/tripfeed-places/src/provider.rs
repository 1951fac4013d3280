use async_trait::async_trait;

use tripfeed_core::GeoPoint;

use crate::error::PlacesError;
use crate::types::{RawPlaceDetail, RawPlaceRecord};

/// Capability interface over the external place-search provider.
///
/// The aggregator takes this as an injected dependency so tests can substitute
/// a fake without touching the network. The production implementation is
/// [`crate::GooglePlacesClient`].
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Keyword search around a point, bounded by `radius_m` meters.
    async fn nearby_search(
        &self,
        location: GeoPoint,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<RawPlaceRecord>, PlacesError>;

    /// Full detail payload for one place.
    async fn place_details(&self, place_id: &str) -> Result<RawPlaceDetail, PlacesError>;

    /// Constructed, key-bearing URL for a provider photo reference.
    fn photo_url(&self, photo_reference: &str) -> String;
}
