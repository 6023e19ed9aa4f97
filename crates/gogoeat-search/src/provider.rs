//! Capabilities the search pipeline consumes from its environment.
//!
//! [`PlacesProvider`] is implemented for the live [`PlacesClient`]; tests
//! substitute scripted fakes. Map state and user location are read-only
//! accessors so the pipeline can run without a rendering surface.

use std::future::Future;

use gogoeat_core::{viewport_for_zoom, Bounds, Coordinate};
use gogoeat_places::{PlaceDetails, PlacesClient, PlacesError, RawGeocodeResult, RawPlace};

/// Text search, nearby search, geocoding, and details lookups.
pub trait PlacesProvider: Send + Sync {
    fn text_search(
        &self,
        query: &str,
        location: Coordinate,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send;

    fn nearby_search(
        &self,
        location: Coordinate,
        radius_m: u32,
        keyword: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send;

    fn geocode(
        &self,
        address: &str,
        region: &str,
        bounds: Option<Bounds>,
    ) -> impl Future<Output = Result<Vec<RawGeocodeResult>, PlacesError>> + Send;

    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<Option<PlaceDetails>, PlacesError>> + Send;
}

impl PlacesProvider for PlacesClient {
    fn text_search(
        &self,
        query: &str,
        location: Coordinate,
        radius_m: u32,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send {
        PlacesClient::text_search(self, query, location, radius_m)
    }

    fn nearby_search(
        &self,
        location: Coordinate,
        radius_m: u32,
        keyword: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RawPlace>, PlacesError>> + Send {
        PlacesClient::nearby_search(self, location, radius_m, keyword)
    }

    fn geocode(
        &self,
        address: &str,
        region: &str,
        bounds: Option<Bounds>,
    ) -> impl Future<Output = Result<Vec<RawGeocodeResult>, PlacesError>> + Send {
        PlacesClient::geocode(self, address, region, bounds)
    }

    fn place_details(
        &self,
        place_id: &str,
    ) -> impl Future<Output = Result<Option<PlaceDetails>, PlacesError>> + Send {
        PlacesClient::place_details(self, place_id)
    }
}

/// Read-only view of the map the user is looking at.
pub trait MapView: Send + Sync {
    fn current_viewport(&self) -> Bounds;
    fn current_center(&self) -> Coordinate;
}

/// A map view that never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMapView {
    pub center: Coordinate,
    pub viewport: Bounds,
}

impl StaticMapView {
    /// Derives the viewport a `width_px` × `height_px` map would show at `zoom`.
    #[must_use]
    pub fn from_zoom(center: Coordinate, zoom: u8, width_px: u32, height_px: u32) -> Self {
        Self {
            center,
            viewport: viewport_for_zoom(center, zoom, width_px, height_px),
        }
    }
}

impl MapView for StaticMapView {
    fn current_viewport(&self) -> Bounds {
        self.viewport
    }

    fn current_center(&self) -> Coordinate {
        self.center
    }
}

/// Source of the user's physical location; `None` when unavailable or denied.
pub trait LocationProvider: Send + Sync {
    fn user_location(&self) -> impl Future<Output = Option<Coordinate>> + Send;
}

/// A location provider with a predetermined answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coordinate>);

impl LocationProvider for FixedLocation {
    async fn user_location(&self) -> Option<Coordinate> {
        self.0
    }
}

/// The user's location, or `fallback` when the provider has none.
pub async fn resolve_user_location<L: LocationProvider>(
    provider: &L,
    fallback: Coordinate,
) -> Coordinate {
    if let Some(location) = provider.user_location().await {
        location
    } else {
        tracing::info!(%fallback, "user location unavailable, using default center");
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAIPEI: Coordinate = Coordinate::new(25.033, 121.5654);

    #[tokio::test]
    async fn resolve_prefers_provider_location() {
        let here = Coordinate::new(22.6273, 120.3014);
        let resolved = resolve_user_location(&FixedLocation(Some(here)), TAIPEI).await;
        assert_eq!(resolved, here);
    }

    #[tokio::test]
    async fn resolve_falls_back_when_unavailable() {
        let resolved = resolve_user_location(&FixedLocation(None), TAIPEI).await;
        assert_eq!(resolved, TAIPEI);
    }

    #[test]
    fn static_map_view_contains_its_center() {
        let view = StaticMapView::from_zoom(TAIPEI, 15, 1280, 800);
        assert_eq!(view.current_center(), TAIPEI);
        assert!(view.current_viewport().contains(TAIPEI));
    }
}
