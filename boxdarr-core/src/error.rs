use std::time::Duration;

use thiserror::Error;

/// Failure of a raw HTTP fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, TLS or body read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// The client timeout elapsed.
    #[error("Timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status(status.as_u16());
        }
        FetchError::Transport(err.to_string())
    }
}

/// Failure of a single provider call. The `Display` output is what ends up in
/// the `message` of a [`ServiceError`](crate::ServiceError).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The underlying fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body was not what the provider promised.
    #[error("Parse error: {0}")]
    Decode(String),

    /// The provider answered, but had nothing.
    #[error("{0}")]
    NotFound(String),

    /// Provider-side or request construction error.
    #[error("API error: {0}")]
    Api(String),

    /// The per-call budget elapsed.
    #[error("Timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),
}

impl ProviderError {
    /// A negative answer carrying `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// `NotFound` is a negative answer from the provider, everything else is a
    /// failure to get an answer at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

/// Result of a provider call.
pub type Result<T> = std::result::Result<T, ProviderError>;
