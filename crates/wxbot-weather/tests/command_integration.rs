//! End-to-end tests for the weather command against mock HTTP servers and an
//! on-disk location store.

use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wxbot_weather::command::USAGE;
use wxbot_weather::{
    GeocodingClient, LocationStore, ResolutionRequest, WeatherClient, WeatherCommand,
};

fn geocode_body(address: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "status": "OK",
        "results": [{
            "formatted_address": address,
            "geometry": {"location": {"lat": lat, "lng": lng}}
        }]
    })
}

fn onecall_body() -> serde_json::Value {
    serde_json::json!({
        "current": {
            "temp": 55.4,
            "humidity": 81,
            "wind_speed": 9.2,
            "weather": [{"description": "light rain"}]
        },
        "daily": [{"temp": {"max": 60.1, "min": 48.3}}],
        "hourly": [{"weather": [{"description": "overcast clouds"}]}]
    })
}

const PARIS_REPORT: &str = "Paris, France: light rain, 55.4F/13.0C\
    (H:60.1F/15.6C L:48.3F/9.1C), Humidity: 81%, Wind: 9.2mph/14.8kph, \
    Forecast for the next hour: \u{2}overcast clouds\u{2}";

fn request(input: &str) -> ResolutionRequest {
    ResolutionRequest {
        raw_input: input.to_string(),
        channel: "#chan".to_string(),
        caller: "Alice".to_string(),
    }
}

struct Harness {
    geo_server: MockServer,
    wx_server: MockServer,
    db_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self {
            geo_server: MockServer::start().await,
            wx_server: MockServer::start().await,
            db_path: dir.path().join("locations.db"),
            _dir: dir,
        }
    }

    fn command(&self) -> WeatherCommand {
        WeatherCommand::new(
            GeocodingClient::new_with_base_url("geo-key", &self.geo_server.uri()),
            WeatherClient::new_with_base_url("wx-key", &self.wx_server.uri()),
            LocationStore::open(&self.db_path).unwrap(),
        )
    }

    /// Independent handle on the same database file, for seeding and
    /// asserting on rows.
    fn store(&self) -> LocationStore {
        LocationStore::open(&self.db_path).unwrap()
    }

    async fn mock_paris_geocode(&self) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(geocode_body("Paris, France", 48.8566, 2.3522)),
            )
            .mount(&self.geo_server)
            .await;
    }

    async fn mock_weather(&self) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body()))
            .mount(&self.wx_server)
            .await;
    }
}

#[tokio::test]
async fn successful_query_replies_and_saves() {
    let harness = Harness::new().await;
    harness.mock_paris_geocode().await;
    harness.mock_weather().await;

    let reply = harness.command().run(&request("Paris")).await;
    assert_eq!(reply, PARIS_REPORT);

    let row = harness.store().get("#chan", "alice").unwrap().unwrap();
    assert_eq!(row.address, "Paris, France");
    assert_eq!(row.latitude, 48.8566);
    assert_eq!(row.longitude, 2.3522);
}

#[tokio::test]
async fn dontsave_replies_but_never_upserts() {
    let harness = Harness::new().await;
    harness.mock_paris_geocode().await;
    harness.mock_weather().await;

    let reply = harness.command().run(&request("Paris dontsave")).await;
    assert_eq!(reply, PARIS_REPORT);

    assert!(harness.store().get("#chan", "alice").unwrap().is_none());
}

#[tokio::test]
async fn target_without_saved_row_replies_without_geocoding() {
    let harness = Harness::new().await;

    // The geocoder must not be consulted for `@identity` lookups.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body("x", 0.0, 0.0)))
        .expect(0)
        .mount(&harness.geo_server)
        .await;

    let reply = harness.command().run(&request("@bob")).await;
    assert_eq!(reply, "No location saved for bob");
}

#[tokio::test]
async fn target_with_saved_row_reports_their_weather() {
    let harness = Harness::new().await;
    harness.mock_weather().await;

    harness
        .store()
        .upsert(&wxbot_weather::LocationRecord {
            channel: "#chan".to_string(),
            identity: "Bob".to_string(),
            address: "Paris, France".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        })
        .unwrap();

    let reply = harness.command().run(&request("@BOB")).await;
    assert_eq!(reply, PARIS_REPORT);
}

#[tokio::test]
async fn blank_without_saved_row_shows_usage() {
    let harness = Harness::new().await;

    let reply = harness.command().run(&request("")).await;
    assert_eq!(reply, USAGE);
}

#[tokio::test]
async fn blank_with_saved_row_uses_it() {
    let harness = Harness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body("x", 0.0, 0.0)))
        .expect(0)
        .mount(&harness.geo_server)
        .await;

    harness
        .store()
        .upsert(&wxbot_weather::LocationRecord {
            channel: "#chan".to_string(),
            identity: "alice".to_string(),
            address: "Paris, France".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        })
        .unwrap();

    // Weather request must use the stored coordinates.
    Mock::given(method("GET"))
        .and(query_param("lat", "48.8566"))
        .and(query_param("lon", "2.3522"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body()))
        .mount(&harness.wx_server)
        .await;

    let reply = harness.command().run(&request("")).await;
    assert_eq!(reply, PARIS_REPORT);
}

#[tokio::test]
async fn failed_geocode_echoes_the_stripped_query() {
    let harness = Harness::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&harness.geo_server)
        .await;

    let reply = harness.command().run(&request("Nowhere dontsave")).await;
    assert_eq!(reply, "Failed to determine location for nowhere");
}

#[tokio::test]
async fn weather_failure_echoes_the_query() {
    let harness = Harness::new().await;
    harness.mock_paris_geocode().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": [],
            "hourly": []
        })))
        .mount(&harness.wx_server)
        .await;

    let reply = harness.command().run(&request("Paris")).await;
    assert_eq!(reply, "Failed to get weather data for paris");

    // A failed fetch is not a savable resolution.
    assert!(harness.store().get("#chan", "alice").unwrap().is_none());
}

#[tokio::test]
async fn consecutive_saves_leave_one_row_with_the_latest() {
    let harness = Harness::new().await;
    harness.mock_weather().await;

    Mock::given(method("GET"))
        .and(query_param("address", "paris"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("Paris, France", 48.8566, 2.3522)),
        )
        .mount(&harness.geo_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("address", "oslo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("Oslo, Norway", 59.9139, 10.7522)),
        )
        .mount(&harness.geo_server)
        .await;

    let command = harness.command();
    command.run(&request("Paris")).await;
    command.run(&request("Oslo")).await;

    let row = harness.store().get("#chan", "alice").unwrap().unwrap();
    assert_eq!(row.address, "Oslo, Norway");
}

#[tokio::test]
async fn missing_credentials_disable_the_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = wxbot_core::Config {
        geocoding_api_key: Some("geo-key".to_string()),
        weather_api_key: None,
        data_dir: dir.path().to_path_buf(),
    };

    assert!(WeatherCommand::from_config(&config).unwrap().is_none());

    let config = wxbot_core::Config {
        geocoding_api_key: Some("geo-key".to_string()),
        weather_api_key: Some("wx-key".to_string()),
        data_dir: dir.path().to_path_buf(),
    };
    assert!(WeatherCommand::from_config(&config).unwrap().is_some());
}
