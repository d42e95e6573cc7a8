use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, Text};
use tracing::debug;
use weather_core::{Config, Key, SearchInput, WeatherWidget, provider_from_config, render};

use crate::host::run_and_render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive widget (the default).
    Run,

    /// Look up one city, print it, and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Store the OpenWeather API key and default city.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Run) {
            Command::Run => interactive().await?,
            Command::Show { city } => {
                // The error view is already printed; only the exit status is left to report.
                if !show(&Config::load()?, &city).await? {
                    return Ok(ExitCode::FAILURE);
                }
            }
            Command::Configure => configure()?,
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn build_widget(config: &Config) -> anyhow::Result<WeatherWidget> {
    let provider = provider_from_config(config)?;
    Ok(WeatherWidget::new(Arc::from(provider), config.default_city.clone()))
}

/// Print the lookup for `city`. Returns whether it produced weather.
async fn show(config: &Config, city: &str) -> anyhow::Result<bool> {
    let widget = build_widget(config)?;

    widget.submit_text(city).await;

    let state = widget.state();
    println!("{}", render(&state));

    Ok(state.result().is_some())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let widget = build_widget(&config)?;
    let mut input = SearchInput::new();

    run_and_render(&widget, widget.mount()).await;

    loop {
        let outcome = if widget.state().can_retry() && ask_retry()? {
            run_and_render(&widget, widget.retry()).await
        } else {
            match prompt_search(&input)? {
                Some(text) => {
                    input.set_text(text);
                    // The prompt returns on Enter.
                    let Some(submit) = input.handle_key(Key::Enter) else {
                        continue;
                    };
                    run_and_render(&widget, widget.submit(submit)).await
                }
                None => break,
            }
        };
        debug!(?outcome, "lookup finished");
    }

    widget.teardown();
    Ok(())
}

/// Enter in the prompt is the search submission. `None` means the user left.
fn prompt_search(input: &SearchInput) -> anyhow::Result<Option<String>> {
    let answer = Text::new("City:")
        .with_placeholder("Search")
        .with_initial_value(input.text())
        .with_help_message("Enter to search, Esc to quit")
        .prompt();

    match answer {
        Ok(text) => Ok(Some(text)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city name"),
    }
}

fn ask_retry() -> anyhow::Result<bool> {
    match Confirm::new("Retry?").with_default(true).prompt() {
        Ok(retry) => Ok(retry),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
        Err(e) => Err(e).context("Failed to read retry answer"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !city.is_empty() {
        config.default_city = city;
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::parse_from(["weather"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn show_takes_a_city() {
        let cli = Cli::parse_from(["weather", "-vv", "show", "New York"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city, "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn build_widget_needs_api_key() {
        let err = build_widget(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("weather configure"));
    }

    #[tokio::test]
    async fn show_reports_failed_lookup_through_return_value() {
        let mut config = Config::default();
        config.set_api_key("KEY".into());
        config.base_url = "http://127.0.0.1:1".into();

        let found = show(&config, "London").await.expect("lookup failure is not a CLI error");
        assert!(!found);
    }

    #[tokio::test]
    async fn show_reports_found_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "London",
                "main": {"temp": 15.9, "humidity": 60},
                "wind": {"speed": 3.2},
                "weather": [{"icon": "01d"}]
            })))
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.set_api_key("KEY".into());
        config.base_url = server.uri();

        assert!(show(&config, "London").await.expect("lookup runs"));
    }

    #[test]
    fn build_widget_uses_default_city() {
        let mut config = Config::default();
        config.set_api_key("KEY".into());
        config.default_city = "Lahore".into();

        let widget = build_widget(&config).expect("widget builds");
        assert_eq!(widget.default_city(), "Lahore");
        assert_eq!(widget.last_city(), "Lahore");
    }
}
