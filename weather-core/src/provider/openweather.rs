use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    FetchError,
    icon::WeatherIcon,
    model::{WeatherResult, floor_temperature},
};

use super::WeatherProvider;

/// OpenWeather "current weather" client.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http: Client::new(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// Every field is optional: a partial body still renders, with N/A for the gaps.
#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: Option<OwMain>,
    wind: Option<OwWind>,
    weather: Option<Vec<OwWeather>>,
}

impl OwCurrentResponse {
    fn into_result(self, requested_city: &str) -> WeatherResult {
        let main = self.main.unwrap_or_default();
        let wind = self.wind.unwrap_or_default();

        let code = self
            .weather
            .as_deref()
            .and_then(|conditions| conditions.first())
            .and_then(|w| w.icon.as_deref());

        WeatherResult {
            city: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| requested_city.to_string()),
            temperature_c: main.temp.map(floor_temperature).into(),
            humidity_pct: main.humidity.into(),
            wind_speed: wind.speed.into(),
            icon: WeatherIcon::from_code(code),
        }
    }
}

/// Map the JSON body of a successful response to a display result.
fn parse_current(body: &str, requested_city: &str) -> Result<WeatherResult, FetchError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(parsed.into_result(requested_city))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), level = "debug")]
    async fn current_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = res.status();
        debug!(%status, "OpenWeather responded");

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = res.text().await.map_err(FetchError::network)?;

        parse_current(&body, city)
    }
}
