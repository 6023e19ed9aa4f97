//! Scripted [`PlacesProvider`] fake and record builders shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use gogoeat_core::{Bounds, CandidateSource, Coordinate, RestaurantCandidate};
use gogoeat_places::{
    Geometry, LatLng, PlaceDetails, PlacesError, RawGeocodeResult, RawPlace,
};

use crate::provider::{PlacesProvider, StaticMapView};

pub(crate) const TAIPEI: Coordinate = Coordinate::new(25.033, 121.5654);

pub(crate) fn viewport() -> Bounds {
    Bounds::new(Coordinate::new(25.02, 121.55), Coordinate::new(25.05, 121.58))
}

pub(crate) fn map_view() -> StaticMapView {
    StaticMapView {
        center: TAIPEI,
        viewport: viewport(),
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Scripted<T> {
    Ok(Vec<T>),
    Fail,
}

impl<T> Default for Scripted<T> {
    fn default() -> Self {
        Scripted::Ok(Vec::new())
    }
}

impl<T> Scripted<T> {
    fn into_result(self) -> Result<Vec<T>, PlacesError> {
        match self {
            Scripted::Ok(items) => Ok(items),
            Scripted::Fail => Err(PlacesError::Api {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: "scripted failure".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Text(String),
    Nearby(Option<String>),
    Geocode {
        address: String,
        bounds: Option<Bounds>,
    },
    Details(String),
}

#[derive(Default)]
pub(crate) struct FakeProvider {
    pub text: HashMap<String, Scripted<RawPlace>>,
    pub text_delay: HashMap<String, Duration>,
    /// Answers for successive geocode calls; exhausted means zero results.
    pub geocode: Mutex<VecDeque<Scripted<RawGeocodeResult>>>,
    pub nearby: Scripted<RawPlace>,
    pub details: HashMap<String, PlaceDetails>,
    pub fail_details: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub(crate) fn with_text(mut self, query: &str, answer: Scripted<RawPlace>) -> Self {
        self.text.insert(query.to_string(), answer);
        self
    }

    pub(crate) fn with_geocode(self, answer: Scripted<RawGeocodeResult>) -> Self {
        self.geocode.lock().unwrap().push_back(answer);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn geocode_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Geocode { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PlacesProvider for FakeProvider {
    async fn text_search(
        &self,
        query: &str,
        _location: Coordinate,
        _radius_m: u32,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        self.record(Call::Text(query.to_string()));
        if let Some(delay) = self.text_delay.get(query) {
            tokio::time::sleep(*delay).await;
        }
        self.text.get(query).cloned().unwrap_or_default().into_result()
    }

    async fn nearby_search(
        &self,
        _location: Coordinate,
        _radius_m: u32,
        keyword: Option<&str>,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        self.record(Call::Nearby(keyword.map(str::to_string)));
        self.nearby.clone().into_result()
    }

    async fn geocode(
        &self,
        address: &str,
        _region: &str,
        bounds: Option<Bounds>,
    ) -> Result<Vec<RawGeocodeResult>, PlacesError> {
        self.record(Call::Geocode {
            address: address.to_string(),
            bounds,
        });
        let answer = self.geocode.lock().unwrap().pop_front();
        answer.unwrap_or_default().into_result()
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        self.record(Call::Details(place_id.to_string()));
        if self.fail_details {
            return Err(PlacesError::Api {
                status: "NOT_FOUND".to_string(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(self.details.get(place_id).cloned())
    }
}

fn geometry(lat: f64, lng: f64) -> Option<Geometry> {
    Some(Geometry {
        location: Some(LatLng { lat, lng }),
    })
}

pub(crate) fn place(id: &str, name: &str, lat: f64, lng: f64) -> RawPlace {
    RawPlace {
        place_id: Some(id.to_string()),
        name: Some(name.to_string()),
        geometry: geometry(lat, lng),
        ..RawPlace::default()
    }
}

pub(crate) fn geocoded(id: &str, address: &str, lat: f64, lng: f64) -> RawGeocodeResult {
    RawGeocodeResult {
        place_id: Some(id.to_string()),
        formatted_address: address.to_string(),
        geometry: geometry(lat, lng),
        types: vec!["establishment".to_string()],
    }
}

pub(crate) fn candidate(identity: &str, place_id: Option<&str>) -> RestaurantCandidate {
    RestaurantCandidate {
        identity: identity.to_string(),
        place_id: place_id.map(str::to_string),
        name: identity.to_string(),
        location: TAIPEI,
        rating: 4.0,
        price_level: 2,
        is_open_now: true,
        has_parking: None,
        address: String::new(),
        categories: Vec::new(),
        source: CandidateSource::TextVariant,
    }
}
