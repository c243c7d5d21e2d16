use serde::{Deserialize, Serialize};

/// One invocation of the weather command, as delivered by the chat framework.
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    /// Everything after the command word, untrimmed.
    pub raw_input: String,
    /// Channel the command was issued in.
    pub channel: String,
    /// Chat handle of the caller.
    pub caller: String,
}

/// A saved location row, shared with other features that track user locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub channel: String,
    /// Always stored lowercased; lookups are case-insensitive.
    pub identity: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Where to fetch weather for, decided by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// True only for a successfully geocoded, non-empty query without a
    /// `dontsave` marker. Saved-row paths never re-save.
    pub save: bool,
}

/// Canonical address plus coordinates returned by the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub formatted_address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Everything the report line needs, in the provider's native units.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub temp_f: f64,
    pub high_f: f64,
    pub low_f: f64,
    pub humidity: u8,
    pub wind_mph: f64,
    pub condition: String,
    /// First hourly-forecast condition; empty when the provider omits it.
    pub next_hour_condition: String,
}

/// One report's worth of data, derived per call and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub address: String,
    pub observation: WeatherObservation,
}

impl WeatherReport {
    pub fn new(address: impl Into<String>, observation: WeatherObservation) -> Self {
        Self {
            address: address.into(),
            observation,
        }
    }
}

/// Geocoding errors.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoding service unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// Non-OK status, empty results, or missing geometry in the response.
    #[error("no location found")]
    NotFound,
}

/// Weather provider errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherFetchError {
    #[error("weather service unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The response lacks a field the report cannot do without.
    #[error("weather response missing required data")]
    IncompleteData,
}

/// Location resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// `@identity` lookup found no saved row for that identity.
    #[error("no location saved for {0}")]
    NoSavedLocation(String),

    /// Blank invocation and the caller has never saved a location.
    #[error("no query given and no saved location")]
    NoQueryAndNoSavedLocation,

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Location store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("location database error: {0}")]
    Db(#[from] rusqlite::Error),
}
