//! HTTP client for the Maps web-service JSON endpoints.
//!
//! Every endpoint answers with a `{"status": ...}` envelope. `OK` carries
//! results, `ZERO_RESULTS` is an empty answer rather than a failure, and any
//! other status surfaces as [`PlacesError::Api`].

use std::time::Duration;

use gogoeat_core::{Bounds, Coordinate};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{DetailsResponse, ListResponse, PlaceDetails, RawGeocodeResult, RawPlace};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

const TEXT_SEARCH_PATH: &str = "place/textsearch/json";
const NEARBY_SEARCH_PATH: &str = "place/nearbysearch/json";
const DETAILS_PATH: &str = "place/details/json";
const GEOCODE_PATH: &str = "geocode/json";

const DETAILS_FIELDS: &str = "place_id,name,rating,reviews,formatted_phone_number,\
                              opening_hours,website,price_level,formatted_address";

/// Client for the Places and Geocoding web services.
///
/// Use [`PlacesClient::new`] for production or [`PlacesClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("gogoeat/0.1 (restaurant-search)")
            .build()?;

        // A trailing slash makes `Url::join` append endpoint paths instead of
        // replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the retry policy for transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Free-text place search biased toward `location`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Api`] if the service returns an error status.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn text_search(
        &self,
        query: &str,
        location: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let location = location.to_string();
        let radius = radius_m.to_string();
        let url = self.build_url(
            TEXT_SEARCH_PATH,
            &[("query", query), ("location", &location), ("radius", &radius)],
        )?;
        self.fetch_list(&url, &format!("textsearch(query={query})"))
            .await
    }

    /// Restaurants within `radius_m` of `location`, optionally narrowed by keyword.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::text_search`].
    pub async fn nearby_search(
        &self,
        location: Coordinate,
        radius_m: u32,
        keyword: Option<&str>,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        let location = location.to_string();
        let radius = radius_m.to_string();
        let mut params = vec![
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", "restaurant"),
        ];
        if let Some(k) = keyword {
            params.push(("keyword", k));
        }
        let url = self.build_url(NEARBY_SEARCH_PATH, &params)?;
        self.fetch_list(&url, &format!("nearbysearch(location={location})"))
            .await
    }

    /// Geocodes `address` within `region` (ISO country code), optionally
    /// biased toward `bounds`.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::text_search`].
    pub async fn geocode(
        &self,
        address: &str,
        region: &str,
        bounds: Option<Bounds>,
    ) -> Result<Vec<RawGeocodeResult>, PlacesError> {
        let components = format!("country:{region}");
        let bounds = bounds.map(|b| format!("{}|{}", b.south_west, b.north_east));
        let mut params = vec![("address", address), ("components", components.as_str())];
        if let Some(b) = &bounds {
            params.push(("bounds", b));
        }
        let url = self.build_url(GEOCODE_PATH, &params)?;
        self.fetch_list(&url, &format!("geocode(address={address})"))
            .await
    }

    /// Fetches phone, website, hours, and reviews for a place.
    ///
    /// Returns `Ok(None)` when the service has nothing for `place_id`.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::text_search`].
    pub async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<Option<PlaceDetails>, PlacesError> {
        let url = self.build_url(
            DETAILS_PATH,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let Some(body) = self.get_checked(&url).await? else {
            return Ok(None);
        };
        let envelope: DetailsResponse =
            parse(body, &format!("details(place_id={place_id})"))?;
        Ok(envelope.result)
    }

    /// Builds the endpoint URL with the API key and percent-encoded parameters.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<Vec<T>, PlacesError> {
        let Some(body) = self.get_checked(url).await? else {
            tracing::debug!(context, "maps API returned ZERO_RESULTS");
            return Ok(Vec::new());
        };
        let envelope: ListResponse<T> = parse(body, context)?;
        tracing::debug!(context, count = envelope.results.len(), "maps API results");
        Ok(envelope.results)
    }

    /// GETs `url` with retries and checks the envelope status.
    ///
    /// Returns `None` for `ZERO_RESULTS`.
    async fn get_checked(&self, url: &Url) -> Result<Option<serde_json::Value>, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let body = self.request_json(url).await?;
            check_status(&body).map(|has_results| has_results.then_some(body))
        })
        .await
    }

    /// Transport errors are stripped of their URL, which carries the API key.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Reads the envelope `status`: `Ok(true)` for `OK`, `Ok(false)` for
/// `ZERO_RESULTS`, [`PlacesError::Api`] for anything else.
fn check_status(body: &serde_json::Value) -> Result<bool, PlacesError> {
    let status = body
        .get("status")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("MISSING_STATUS");
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" => Ok(false),
        other => {
            let message = body
                .get("error_message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("no error message")
                .to_string();
            Err(PlacesError::Api {
                status: other.to_string(),
                message,
            })
        }
    }
}

fn parse<T: DeserializeOwned>(body: serde_json::Value, context: &str) -> Result<T, PlacesError> {
    serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
