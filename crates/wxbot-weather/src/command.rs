//! The weather command orchestrator.
//!
//! Sequences resolution, the two API calls, formatting, and the conditional
//! location save. Every failure past the credential gate becomes exactly one
//! short reply; nothing is retried and nothing crashes the invocation.

use tracing::instrument;
use wxbot_core::Config;

use crate::geocode::GeocodingClient;
use crate::provider::WeatherClient;
use crate::report::format_report;
use crate::resolve::{parse_input, resolve, ParsedInput};
use crate::store::LocationStore;
use crate::types::{
    LocationRecord, ResolutionRequest, ResolveError, StoreError, WeatherReport,
};

/// Shown on a blank invocation when the caller has no saved location.
pub const USAGE: &str = "weather <location> [dontsave] | @<nick> -- Get weather data.";

pub struct WeatherCommand {
    geocoder: GeocodingClient,
    provider: WeatherClient,
    store: LocationStore,
}

impl WeatherCommand {
    pub fn new(geocoder: GeocodingClient, provider: WeatherClient, store: LocationStore) -> Self {
        Self {
            geocoder,
            provider,
            store,
        }
    }

    /// Build the command from configuration.
    ///
    /// Returns `Ok(None)` when either credential is missing: the command is
    /// disabled and invocations produce no reply at all.
    pub fn from_config(config: &Config) -> Result<Option<Self>, StoreError> {
        let (Some(geo_key), Some(wx_key)) = (
            config.geocoding_api_key.as_deref(),
            config.weather_api_key.as_deref(),
        ) else {
            tracing::debug!("weather command disabled: missing API credentials");
            return Ok(None);
        };

        let store = LocationStore::open(config.location_db_path())?;
        Ok(Some(Self::new(
            GeocodingClient::new(geo_key),
            WeatherClient::new(wx_key),
            store,
        )))
    }

    /// Run one invocation and produce the reply line.
    #[instrument(skip(self), fields(channel = %request.channel, caller = %request.caller), level = "info")]
    pub async fn run(&self, request: &ResolutionRequest) -> String {
        // The table is shared with other features; make sure it exists
        // before any read.
        if let Err(e) = self.store.ensure_schema() {
            tracing::warn!(error = %e, "failed to ensure location schema");
        }

        let parsed = parse_input(&request.raw_input);

        let resolved = match resolve(
            &parsed,
            &request.channel,
            &request.caller,
            &self.store,
            &self.geocoder,
        )
        .await
        {
            Ok(resolved) => resolved,
            Err(err) => return resolution_reply(err, &parsed),
        };

        let observation = match self
            .provider
            .fetch(resolved.latitude, resolved.longitude)
            .await
        {
            Ok(observation) => observation,
            Err(err) => {
                tracing::debug!(error = %err, "weather fetch failed");
                return format!(
                    "Failed to get weather data for {}",
                    shown_input(&parsed, &resolved.address)
                );
            }
        };

        let line = format_report(&WeatherReport::new(resolved.address.clone(), observation));

        // Only an explicit, successfully geocoded query is savable.
        if resolved.save {
            let record = LocationRecord {
                channel: request.channel.clone(),
                identity: request.caller.clone(),
                address: resolved.address,
                latitude: resolved.latitude,
                longitude: resolved.longitude,
            };
            if let Err(e) = self.store.upsert(&record) {
                tracing::warn!(error = %e, "failed to save location");
            }
        }

        line
    }
}

fn resolution_reply(err: ResolveError, parsed: &ParsedInput) -> String {
    match err {
        ResolveError::NoQueryAndNoSavedLocation => USAGE.to_string(),
        ResolveError::NoSavedLocation(identity) => {
            format!("No location saved for {identity}")
        }
        ResolveError::Geocode(e) => {
            tracing::debug!(error = %e, "geocode failed");
            format!("Failed to determine location for {}", query_text(parsed))
        }
        ResolveError::Store(e) => {
            tracing::warn!(error = %e, "location store read failed");
            "Failed to look up saved locations".to_string()
        }
    }
}

/// The query as it should be echoed back: post-strip and lowercased, so a
/// `dontsave` marker is never reported as part of the place name.
fn query_text(parsed: &ParsedInput) -> &str {
    match parsed {
        ParsedInput::Query { text, .. } => text,
        _ => "",
    }
}

fn shown_input(parsed: &ParsedInput, address: &str) -> String {
    match parsed {
        ParsedInput::Query { text, .. } => text.clone(),
        ParsedInput::Target(identity) => format!("@{identity}"),
        ParsedInput::Own => address.to_string(),
    }
}
