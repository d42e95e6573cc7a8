//! Terminal rendering of the widget while a lookup runs.

use std::future::Future;

use weather_core::{FetchOutcome, ViewState, WeatherWidget, render};

/// Drive `lookup` to completion, printing every state the widget passes through.
///
/// The spinner line is printed as soon as the widget enters `Loading`; the
/// settled state is printed once the lookup returns.
pub async fn run_and_render<F>(widget: &WeatherWidget, lookup: F) -> FetchOutcome
where
    F: Future<Output = FetchOutcome>,
{
    let mut rx = widget.subscribe();
    let mut watching = true;
    tokio::pin!(lookup);

    let outcome = loop {
        tokio::select! {
            biased;
            outcome = &mut lookup => break outcome,
            changed = rx.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                } else if rx.borrow_and_update().is_loading() {
                    print_state(&ViewState::Loading);
                }
            }
        }
    };

    if outcome != FetchOutcome::Abandoned {
        print_state(&widget.state());
    }

    outcome
}

fn print_state(state: &ViewState) {
    println!("{}\n", render(state));
}
