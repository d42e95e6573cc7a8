//! Pure rendering of [`ViewState`] into what the user sees.

use std::fmt;

use crate::{ViewState, WeatherResult, icon::WeatherIcon};

pub const LOADING_LABEL: &str = "Loading weather…";
pub const IDLE_PROMPT: &str = "Enter a city name to see the weather";

/// One of the four mutually exclusive presentations.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Loading,
    Error { message: String, retry: bool },
    Weather(&'a WeatherResult),
    Prompt,
}

/// Map state to its presentation.
pub fn render(state: &ViewState) -> View<'_> {
    match state {
        ViewState::Loading => View::Loading,
        ViewState::Error(err) => View::Error {
            message: err.to_string(),
            retry: err.is_retryable(),
        },
        ViewState::Success(result) => View::Weather(result),
        ViewState::Idle => View::Prompt,
    }
}

impl View<'_> {
    pub fn icon(&self) -> Option<WeatherIcon> {
        match self {
            View::Weather(result) => Some(result.icon),
            _ => None,
        }
    }

    pub fn offers_retry(&self) -> bool {
        matches!(self, View::Error { retry: true, .. })
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Loading => write!(f, "⟳ {LOADING_LABEL}"),
            View::Error { message, retry } => {
                write!(f, "✖ {message}")?;
                if *retry {
                    write!(f, "\n  [Retry]")?;
                }
                Ok(())
            }
            View::Weather(result) => {
                writeln!(f, "{}  {}°C", result.icon.glyph(), result.temperature_c)?;
                writeln!(f, "{}", result.city)?;
                writeln!(f, "  Humidity  {} %", result.humidity_pct)?;
                write!(f, "  Wind      {} Km/h", result.wind_speed)
            }
            View::Prompt => f.write_str(IDLE_PROMPT),
        }
    }
}
