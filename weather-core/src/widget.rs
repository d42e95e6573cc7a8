//! The weather widget: search submissions in, [`ViewState`] transitions out.
//!
//! State lives in a `watch` channel. Every transition is one
//! `send_if_modified` call, so subscribers never see a half-applied update,
//! and the single-flight check happens inside the same update that enters
//! `Loading`.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{FetchError, ViewState, input::Submit, provider::WeatherProvider};

/// What happened to a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The request ran and the state now shows its result or error.
    Completed,
    /// Another fetch was in flight, or the widget was torn down. State untouched.
    Ignored,
    /// The widget was torn down while the request was in flight; its result was dropped.
    Abandoned,
}

enum Begin {
    Started,
    Rejected,
    Busy,
}

/// Puts the widget back to `Idle` if a started lookup is dropped before it settles.
struct LoadingGuard<'a> {
    widget: &'a WeatherWidget,
    armed: bool,
}

impl LoadingGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed || !self.widget.is_mounted() {
            return;
        }
        self.widget.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = ViewState::Idle;
            true
        });
        debug!("lookup dropped before completion; widget back to idle");
    }
}

#[derive(Debug)]
pub struct WeatherWidget {
    provider: Arc<dyn WeatherProvider>,
    state: watch::Sender<ViewState>,
    default_city: String,
    last_city: Mutex<String>,
    mounted: AtomicBool,
}

impl WeatherWidget {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        let default_city = default_city.into();
        let (state, _) = watch::channel(ViewState::Idle);

        Self {
            provider,
            state,
            last_city: Mutex::new(default_city.clone()),
            default_city,
            mounted: AtomicBool::new(true),
        }
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// City used by [`retry`](Self::retry): the last one sent to the provider.
    pub fn last_city(&self) -> String {
        self.last_city
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Initial lookup for the default city.
    pub async fn mount(&self) -> FetchOutcome {
        let city = self.default_city.clone();
        self.fetch_weather(&city).await
    }

    /// Stop applying results. In-flight requests are left to finish on their own.
    pub fn teardown(&self) {
        self.mounted.store(false, Ordering::SeqCst);
        debug!("weather widget torn down");
    }

    pub async fn submit(&self, submit: Submit) -> FetchOutcome {
        self.fetch_weather(&submit.city).await
    }

    pub async fn submit_text(&self, city: &str) -> FetchOutcome {
        self.fetch_weather(city).await
    }

    /// Repeat the lookup for the last requested city.
    pub async fn retry(&self) -> FetchOutcome {
        let city = self.last_city();
        self.fetch_weather(&city).await
    }

    /// Look up `city` and drive the view through `Loading` to `Success` or `Error`.
    pub async fn fetch_weather(&self, city: &str) -> FetchOutcome {
        if !self.is_mounted() {
            debug!(city, "ignoring lookup on torn-down widget");
            return FetchOutcome::Ignored;
        }

        match self.begin(city) {
            Begin::Busy => {
                debug!(city, "lookup already in flight; ignoring submission");
                return FetchOutcome::Ignored;
            }
            Begin::Rejected => return FetchOutcome::Completed,
            Begin::Started => {}
        }

        let mut guard = LoadingGuard {
            widget: self,
            armed: true,
        };

        *self.last_city.lock().unwrap_or_else(PoisonError::into_inner) = city.to_string();
        debug!(city, "fetching current weather");

        let fetched = self.provider.current_weather(city).await;
        guard.disarm();

        let next = match fetched {
            Ok(result) => {
                info!(city = %result.city, icon = result.icon.asset(), "weather lookup succeeded");
                ViewState::Success(result)
            }
            Err(err) => {
                warn!(city, error = %err, "error fetching weather data");
                ViewState::Error(err)
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if !self.is_mounted() {
                return false;
            }
            *state = next;
            true
        });

        if applied {
            FetchOutcome::Completed
        } else {
            debug!(city, "dropping lookup result after teardown");
            FetchOutcome::Abandoned
        }
    }

    fn begin(&self, city: &str) -> Begin {
        let mut begin = Begin::Busy;

        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            if city.is_empty() {
                *state = ViewState::Error(FetchError::EmptyCity);
                begin = Begin::Rejected;
            } else {
                *state = ViewState::Loading;
                begin = Begin::Started;
            }
            true
        });

        begin
    }
}
