//! Forward geocoding client.
//!
//! Turns a free-text place query into coordinates plus a canonical address.
//! The response is parsed defensively: every field is optional at the wire
//! level, and anything short of a usable result maps to `NotFound`.

use serde::Deserialize;
use tracing::instrument;

use crate::types::{GeocodeError, GeocodedLocation};

const GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Anything that can geocode an address. Lets the resolver be tested without
/// a live HTTP client.
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodeError>;
}

pub struct GeocodingClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: GEOCODING_URL.to_string(),
        }
    }

    /// Point the client at a mock server.
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[async_trait::async_trait]
impl Geocoder for GeocodingClient {
    /// Geocode a query. No retries; transport failures surface as
    /// `Unavailable`, everything else that falls short of coordinates plus a
    /// formatted address is `NotFound`.
    #[instrument(skip(self), level = "debug")]
    async fn geocode(&self, address: &str) -> Result<GeocodedLocation, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let body: GeocodeResponse = response.json().await?;

        if body.status.as_deref() != Some("OK") {
            tracing::debug!(status = ?body.status, "geocode returned non-OK status");
            return Err(GeocodeError::NotFound);
        }

        let first = body.results.into_iter().next().ok_or(GeocodeError::NotFound)?;
        let location = first
            .geometry
            .and_then(|g| g.location)
            .ok_or(GeocodeError::NotFound)?;
        let (lat, lng) = location
            .lat
            .zip(location.lng)
            .ok_or(GeocodeError::NotFound)?;
        let formatted_address = first.formatted_address.ok_or(GeocodeError::NotFound)?;

        Ok(GeocodedLocation {
            formatted_address,
            lat,
            lng,
        })
    }
}
