//! End-to-end polling tests against a mock weatherstack server.

use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wxstack_client::WeatherClient;
use wxstack_eto::UnitSystem;
use wxstack_node::{
    Config, Driver, DriverValue, PollService, ReportSink, CONTROLLER_ADDRESS, FORECAST_DAYS,
};

/// Sink that records every report for later assertions.
#[derive(Default)]
struct CollectSink {
    reports: Arc<Mutex<Vec<(String, Vec<DriverValue>)>>>,
}

impl CollectSink {
    fn new() -> (Self, Arc<Mutex<Vec<(String, Vec<DriverValue>)>>>) {
        let reports = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reports: reports.clone(),
            },
            reports,
        )
    }
}

impl ReportSink for CollectSink {
    fn report(&self, node_address: &str, values: &[DriverValue]) {
        self.reports
            .lock()
            .push((node_address.to_string(), values.to_vec()));
    }
}

fn config() -> Config {
    Config {
        location: "Portland".to_string(),
        api_key: "test-key".to_string(),
        units: UnitSystem::Metric,
        elevation_m: 100.0,
        ..Config::default()
    }
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Portland",
            "lat": "45.523",
            "lon": "-122.676"
        },
        "current": {
            "temperature": 22,
            "weather_code": 116,
            "wind_speed": 9,
            "wind_degree": 250,
            "pressure": 1016,
            "precip": 0,
            "humidity": 55,
            "cloudcover": 25,
            "feelslike": 22,
            "uv_index": 6,
            "visibility": 16
        }
    })
}

fn forecast_body(days: usize) -> serde_json::Value {
    // 2026-07-01T00:00:00Z onwards, one block per day
    let forecastday: Vec<_> = (0..days)
        .map(|i| {
            serde_json::json!({
                "date": format!("2026-07-{:02}", i + 1),
                "date_epoch": 1_782_864_000i64 + i as i64 * 86_400,
                "day": {
                    "maxtemp_c": 25.0, "maxtemp_f": 77.0,
                    "mintemp_c": 15.0, "mintemp_f": 59.0,
                    "maxwind_kph": 7.2, "maxwind_mph": 4.5,
                    "totalprecip_mm": 0.0, "totalprecip_in": 0.0,
                    "avgvis_km": 10.0, "avgvis_miles": 6.0,
                    "avghumidity": 60.0,
                    "uv": 7.0,
                    "condition": {"code": 113}
                }
            })
        })
        .collect();
    serde_json::json!({
        "location": {"name": "Portland", "lat": "35.0", "lon": "-120.0"},
        "forecast": {"forecastday": forecastday}
    })
}

async fn service_for(server: &MockServer) -> (PollService, Arc<Mutex<Vec<(String, Vec<DriverValue>)>>>) {
    let base = Url::parse(&server.uri()).unwrap();
    let client = WeatherClient::with_base_url("test-key", base).unwrap();
    let (sink, reports) = CollectSink::new();
    (PollService::new(config(), client, Box::new(sink)), reports)
}

#[tokio::test]
async fn test_poll_current_publishes_controller_node() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let (service, reports) = service_for(&server).await;
    service.poll_current().await.unwrap();

    let reports = reports.lock();
    assert_eq!(reports.len(), 1);
    let (address, values) = &reports[0];
    assert_eq!(address.as_str(), CONTROLLER_ADDRESS);

    let temp = values
        .iter()
        .find(|v| v.driver == Driver::Temperature)
        .unwrap();
    assert_eq!(temp.value, 22.0);
    assert_eq!(temp.uom, 4); // metric
}

#[tokio::test]
async fn test_poll_forecast_publishes_six_daily_nodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(8)))
        .mount(&server)
        .await;

    let (service, reports) = service_for(&server).await;
    service.poll_forecast().await.unwrap();

    let reports = reports.lock();
    assert_eq!(reports.len(), FORECAST_DAYS);
    for (i, (address, values)) in reports.iter().enumerate() {
        assert_eq!(address, &format!("forecast_{}", i + 1));
        // every daily node carries an ETo value in mm/day
        let eto = values
            .iter()
            .find(|v| v.driver == Driver::Evapotranspiration)
            .unwrap();
        assert_eq!(eto.uom, 106);
        assert!(eto.value > 0.0 && eto.value < 15.0, "ETo = {}", eto.value);
    }
}

#[tokio::test]
async fn test_poll_forecast_skips_missing_days() {
    let server = MockServer::start().await;
    // only today plus two forecast days
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(3)))
        .mount(&server)
        .await;

    let (service, reports) = service_for(&server).await;
    service.poll_forecast().await.unwrap();

    assert_eq!(reports.lock().len(), 2);
}

#[tokio::test]
async fn test_poll_current_api_error_is_an_error() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "success": false,
        "error": {"code": 615, "type": "request_failed", "info": "Your API request failed."}
    });
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let (service, reports) = service_for(&server).await;
    assert!(service.poll_current().await.is_err());
    assert!(reports.lock().is_empty());
}

#[tokio::test]
async fn test_query_re_reports_latest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    let (service, reports) = service_for(&server).await;
    service.poll_current().await.unwrap();
    service.query();

    let reports = reports.lock();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].1, reports[1].1);

    // latest() exposes the same values
    let latest = service.latest(CONTROLLER_ADDRESS).unwrap();
    assert_eq!(latest, reports[0].1);
}
