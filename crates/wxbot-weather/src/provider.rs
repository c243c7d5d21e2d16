//! Weather provider client (one-call style API, imperial units).

use serde::Deserialize;
use tracing::instrument;

use crate::types::{WeatherFetchError, WeatherObservation};

const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: ONECALL_URL.to_string(),
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

    /// Fetch current conditions and forecast for a coordinate pair.
    ///
    /// Every field the report line needs must be present, otherwise the
    /// result is `IncompleteData`. The one exception is the next-hour
    /// forecast condition: if any link of the `hourly[0].weather[0]`
    /// chain is absent it degrades to an empty string instead of failing
    /// the whole request.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherObservation, WeatherFetchError> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("appid", self.api_key.as_str()),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        let body: OneCallResponse = response.json().await?;
        observation_from_response(body)
    }
}

fn observation_from_response(
    body: OneCallResponse,
) -> Result<WeatherObservation, WeatherFetchError> {
    let current = body.current.ok_or(WeatherFetchError::IncompleteData)?;

    let temp_f = current.temp.ok_or(WeatherFetchError::IncompleteData)?;
    let humidity = current.humidity.ok_or(WeatherFetchError::IncompleteData)?;
    let wind_mph = current.wind_speed.ok_or(WeatherFetchError::IncompleteData)?;
    let condition = current
        .weather
        .into_iter()
        .next()
        .and_then(|w| w.description)
        .ok_or(WeatherFetchError::IncompleteData)?;

    let daily_temp = body
        .daily
        .into_iter()
        .next()
        .and_then(|d| d.temp)
        .ok_or(WeatherFetchError::IncompleteData)?;
    let high_f = daily_temp.max.ok_or(WeatherFetchError::IncompleteData)?;
    let low_f = daily_temp.min.ok_or(WeatherFetchError::IncompleteData)?;

    // Forecast condition is best-effort only.
    let next_hour_condition = body
        .hourly
        .into_iter()
        .next()
        .and_then(|h| h.weather.into_iter().next())
        .and_then(|w| w.description)
        .unwrap_or_default();

    Ok(WeatherObservation {
        temp_f,
        high_f,
        low_f,
        humidity,
        wind_mph,
        condition,
        next_hour_condition,
    })
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: Option<Current>,
    #[serde(default)]
    daily: Vec<Daily>,
    #[serde(default)]
    hourly: Vec<Hourly>,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp: Option<f64>,
    humidity: Option<u8>,
    wind_speed: Option<f64>,
    #[serde(default)]
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Daily {
    temp: Option<DailyTemp>,
}

#[derive(Debug, Deserialize)]
struct DailyTemp {
    max: Option<f64>,
    min: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Hourly {
    #[serde(default)]
    weather: Vec<ConditionEntry>,
}
