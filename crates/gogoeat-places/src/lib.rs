//! HTTP client for the Google Maps web-service endpoints GOGOEAT depends on:
//! Places text search, nearby search, place details, and geocoding.

pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use types::{
    Geometry, LatLng, OpeningHours, PlaceDetails, RawGeocodeResult, RawPlace, Review,
};
