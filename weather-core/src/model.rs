use std::fmt;

use crate::{FetchError, icon::WeatherIcon};

/// A measurement the provider may leave out.
///
/// Missing readings are shown as `N/A` rather than defaulting to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Value(T),
    NotAvailable,
}

impl<T> Reading<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::NotAvailable, Reading::Value)
    }
}

impl<T: fmt::Display> fmt::Display for Reading<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => v.fmt(f),
            Reading::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Current conditions for one city, shaped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub city: String,
    /// Whole degrees Celsius, floored.
    pub temperature_c: Reading<i64>,
    pub humidity_pct: Reading<f64>,
    pub wind_speed: Reading<f64>,
    pub icon: WeatherIcon,
}

/// Floor a provider temperature to whole degrees.
pub fn floor_temperature(celsius: f64) -> i64 {
    celsius.floor() as i64
}

/// What the widget is showing. Exactly one state is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Nothing fetched yet and nothing in flight.
    #[default]
    Idle,
    Loading,
    Error(FetchError),
    Success(WeatherResult),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match self {
            ViewState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn can_retry(&self) -> bool {
        self.error().is_some_and(FetchError::is_retryable)
    }
}
