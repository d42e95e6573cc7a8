use thiserror::Error;

/// Why a weather lookup did not produce a result.
///
/// The `Display` text is what the widget shows to the user, so it lives inside
/// [`crate::ViewState::Error`] and must stay cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The search field was submitted empty.
    #[error("Please enter a city name")]
    EmptyCity,

    /// The provider answered 404 for the requested city.
    #[error("City not found")]
    NotFound,

    /// Any other non-success status. The body is not inspected.
    #[error("Failed to fetch weather data")]
    Status(u16),

    /// The request never produced a response (DNS, connect, TLS, read).
    #[error("Network error: {0}")]
    Network(String),

    /// A success response whose body was not the expected JSON.
    #[error("Unexpected response from weather service: {0}")]
    Parse(String),
}

impl FetchError {
    /// Whether the view should offer a retry for this error.
    ///
    /// An empty query is fixed by typing, not by repeating the request.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::EmptyCity)
    }

    pub(crate) fn network(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FetchError::Network(err.without_url().to_string())
    }
}
