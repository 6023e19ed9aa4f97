//! Convert raw places and geocoding records into [`RestaurantCandidate`]s.
//!
//! Records without a finite coordinate are rejected. Missing rating and
//! price level become `0`; a missing open-now flag becomes `true`.

use gogoeat_core::{
    clamp_price_level, clamp_rating, derive_identity, CandidateSource, Coordinate,
    RestaurantCandidate,
};
use gogoeat_places::{LatLng, RawGeocodeResult, RawPlace};

fn resolve_location(location: Option<LatLng>) -> Option<Coordinate> {
    let LatLng { lat, lng } = location?;
    (lat.is_finite() && lng.is_finite()).then(|| Coordinate::new(lat, lng))
}

fn resolve_identity(place_id: Option<&str>, name: &str, location: Coordinate) -> String {
    match place_id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => derive_identity(name, location),
    }
}

/// Normalize a text- or nearby-search record.
#[must_use]
pub fn normalize_place(raw: &RawPlace, source: CandidateSource) -> Option<RestaurantCandidate> {
    let Some(location) = resolve_location(raw.location()) else {
        tracing::debug!(
            name = raw.name.as_deref().unwrap_or(""),
            "dropping place without coordinates"
        );
        return None;
    };
    let name = raw.name.clone().unwrap_or_default();
    let address = raw
        .formatted_address
        .as_deref()
        .or(raw.vicinity.as_deref())
        .unwrap_or("")
        .to_string();

    Some(RestaurantCandidate {
        identity: resolve_identity(raw.place_id.as_deref(), &name, location),
        place_id: raw.place_id.clone().filter(|id| !id.trim().is_empty()),
        location,
        rating: clamp_rating(raw.rating),
        price_level: clamp_price_level(raw.price_level),
        is_open_now: raw
            .opening_hours
            .as_ref()
            .and_then(|h| h.open_now)
            .unwrap_or(true),
        has_parking: None,
        address,
        categories: raw.types.clone(),
        source,
        name,
    })
}

/// Normalize a geocoding match found for `query`.
///
/// Geocoding records carry no venue name, so the name is the first
/// comma-separated segment of the address when that segment is non-empty
/// and shorter than the whole address; otherwise it is `query`.
#[must_use]
pub fn normalize_geocode(
    raw: &RawGeocodeResult,
    query: &str,
    source: CandidateSource,
) -> Option<RestaurantCandidate> {
    let location = resolve_location(raw.location())?;
    let name = geocode_name(&raw.formatted_address, query);

    Some(RestaurantCandidate {
        identity: resolve_identity(raw.place_id.as_deref(), &name, location),
        place_id: raw.place_id.clone().filter(|id| !id.trim().is_empty()),
        location,
        rating: 0.0,
        price_level: 0,
        is_open_now: true,
        has_parking: None,
        address: raw.formatted_address.clone(),
        categories: raw.types.clone(),
        source,
        name,
    })
}

fn geocode_name(formatted_address: &str, query: &str) -> String {
    let first = formatted_address.split(',').next().unwrap_or("").trim();
    if !first.is_empty() && first != formatted_address {
        first.to_string()
    } else {
        query.trim().to_string()
    }
}
