//! Core library for the current-weather widget.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The provider seam and its OpenWeather client
//! - The result model, icon table and view state
//! - The widget state machine and its pure renderer
//!
//! It is used by `weather-widget`, but the widget itself has no terminal
//! dependencies and can be hosted by any front-end.

pub mod config;
pub mod error;
pub mod icon;
pub mod input;
pub mod model;
pub mod provider;
pub mod view;
pub mod widget;

pub use config::Config;
pub use error::FetchError;
pub use icon::WeatherIcon;
pub use input::{Key, SearchInput, Submit};
pub use model::{Reading, ViewState, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use view::{View, render};
pub use widget::{FetchOutcome, WeatherWidget};
