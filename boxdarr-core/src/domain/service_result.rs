use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Service names reported in [`ServiceError::service`].
pub mod service {
    /// Listing and detail pages.
    pub const LETTERBOXD: &str = "Letterboxd";
    /// Ratings lookup.
    pub const OMDB: &str = "Omdb";
    /// Catalog search.
    pub const TMDB: &str = "TMDb";
}

/// A failed call, attributed to the service that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// One of the names in [`service`].
    pub service: String,
    /// Human readable cause.
    pub message: String,
}

impl ServiceError {
    /// Builds an error for `service`.
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one external call: either the data or the error that replaced
/// it. Never both, never neither.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResult<T> {
    /// The call produced data.
    Data(T),
    /// The call failed.
    Error(ServiceError),
}

impl<T> ServiceResult<T> {
    /// Shorthand for an `Error` attributed to `service`.
    pub fn error(service: &str, message: impl Into<String>) -> Self {
        Self::Error(ServiceError::new(service, message))
    }

    /// Folds a provider result, using the error's `Display` as the message.
    pub fn from_result(
        service: &str,
        result: Result<T, ProviderError>,
    ) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(err) => Self::Error(ServiceError::new(service, err.to_string())),
        }
    }

    /// The data, if the call succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// The error, if the call failed.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Data(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Whether the call succeeded.
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
}

/// Runs a provider call under `timeout` and folds every outcome into a
/// [`ServiceResult`] tagged with `service`.
pub async fn guarded<T, F>(
    service: &str,
    timeout: Duration,
    call: F,
) -> ServiceResult<T>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    let result = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    };

    if let Err(err) = &result {
        tracing::debug!(service, error = %err, "provider call failed");
    }

    ServiceResult::from_result(service, result)
}
