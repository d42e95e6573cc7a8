//! HTTP-level tests for the OpenWeather client and the widget on top of it,
//! run against a wiremock server.

use std::sync::Arc;

use weather_core::{
    FetchError, FetchOutcome, OpenWeatherProvider, Reading, ViewState, WeatherIcon,
    WeatherProvider, WeatherResult, WeatherWidget, render,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const API_KEY: &str = "TEST_KEY";

fn london_body() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 15.9, "feels_like": 15.1, "pressure": 1012, "humidity": 60},
        "wind": {"speed": 3.2, "deg": 250},
        "dt": 1_700_000_000,
        "name": "London",
        "cod": 200
    })
}

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new(server.uri(), API_KEY.to_string())
}

async fn mount_weather(server: &MockServer, city: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn london_lookup_is_shaped() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", ResponseTemplate::new(200).set_body_json(london_body()))
        .await;

    let result = provider_for(&server)
        .current_weather("London")
        .await
        .expect("lookup should succeed");

    assert_eq!(
        result,
        WeatherResult {
            city: "London".into(),
            temperature_c: Reading::Value(15),
            humidity_pct: Reading::Value(60.0),
            wind_speed: Reading::Value(3.2),
            icon: WeatherIcon::Clear,
        }
    );
}

#[tokio::test]
async fn city_with_spaces_is_query_encoded() {
    let server = MockServer::start().await;
    mount_weather(
        &server,
        "New York",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"main": {"temp": -0.4}})),
    )
    .await;

    let result = provider_for(&server)
        .current_weather("New York")
        .await
        .expect("lookup should succeed");

    assert_eq!(result.city, "New York");
    assert_eq!(result.temperature_c, Reading::Value(-1));
    assert_eq!(result.humidity_pct, Reading::NotAvailable);
}

#[tokio::test]
async fn not_found_status_maps_to_city_not_found() {
    let server = MockServer::start().await;
    mount_weather(
        &server,
        "Nowhereville",
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
    )
    .await;

    let err = provider_for(&server).current_weather("Nowhereville").await.unwrap_err();

    assert_eq!(err, FetchError::NotFound);
    assert_eq!(err.to_string(), "City not found");
}

#[tokio::test]
async fn other_failure_status_is_generic() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", ResponseTemplate::new(401).set_body_string("not json"))
        .await;

    let err = provider_for(&server).current_weather("London").await.unwrap_err();

    assert_eq!(err, FetchError::Status(401));
    assert_eq!(err.to_string(), "Failed to fetch weather data");
}

#[tokio::test]
async fn malformed_success_body_is_parse_error() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", ResponseTemplate::new(200).set_body_string("<html/>")).await;

    let err = provider_for(&server).current_weather("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_failure_is_network_error_without_key() {
    let provider = OpenWeatherProvider::new("http://127.0.0.1:1".into(), API_KEY.into());

    let err = provider.current_weather("London").await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)), "got {err:?}");
    assert!(!err.to_string().contains(API_KEY));
}

// ============================================================================
// Widget over HTTP
// ============================================================================

#[tokio::test]
async fn widget_renders_successful_lookup() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", ResponseTemplate::new(200).set_body_json(london_body()))
        .await;

    let widget = WeatherWidget::new(Arc::new(provider_for(&server)), "Gujrat");
    assert_eq!(widget.submit_text("London").await, FetchOutcome::Completed);

    let state = widget.state();
    let text = render(&state).to_string();
    assert!(text.contains("15°C"));
    assert!(text.contains("London"));
    assert!(text.contains("60 %"));
    assert!(text.contains("3.2 Km/h"));
}

#[tokio::test]
async fn widget_shows_not_found_with_retry() {
    let server = MockServer::start().await;
    mount_weather(&server, "Nowhereville", ResponseTemplate::new(404)).await;

    let widget = WeatherWidget::new(Arc::new(provider_for(&server)), "Gujrat");
    widget.submit_text("Nowhereville").await;

    let state = widget.state();
    assert_eq!(state, ViewState::Error(FetchError::NotFound));
    assert!(render(&state).offers_retry());
}

#[tokio::test]
async fn widget_empty_city_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(0)
        .mount(&server)
        .await;

    let widget = WeatherWidget::new(Arc::new(provider_for(&server)), "Gujrat");
    widget.submit_text("").await;

    assert_eq!(widget.state(), ViewState::Error(FetchError::EmptyCity));
    server.verify().await;
}

#[tokio::test]
async fn widget_failure_replaces_previous_result() {
    let server = MockServer::start().await;
    mount_weather(&server, "London", ResponseTemplate::new(200).set_body_json(london_body()))
        .await;

    let widget = WeatherWidget::new(Arc::new(provider_for(&server)), "Gujrat");
    widget.submit_text("London").await;
    assert!(widget.state().result().is_some());

    server.reset().await;
    mount_weather(&server, "London", ResponseTemplate::new(503)).await;
    widget.retry().await;

    let state = widget.state();
    assert_eq!(state, ViewState::Error(FetchError::Status(503)));
    assert!(state.result().is_none());
}

#[tokio::test]
async fn widget_connection_error_settles_into_error() {
    let widget = WeatherWidget::new(
        Arc::new(OpenWeatherProvider::new("http://127.0.0.1:1".into(), API_KEY.into())),
        "London",
    );
    assert_eq!(widget.mount().await, FetchOutcome::Completed);

    let state = widget.state();
    assert!(matches!(state, ViewState::Error(FetchError::Network(_))), "got {state:?}");
    assert!(!state.is_loading());
    assert!(state.can_retry());
}
