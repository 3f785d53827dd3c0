use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, ProviderError};

const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Raw GET capability shared by every component that talks to the outside.
/// Tests substitute their own implementation.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GETs `url` and returns the body of a success response.
    async fn get_text(&self, url: &Url) -> Result<String, FetchError>;
}

/// Result of fetching a page. A failed fetch is never confused with a page
/// whose body happens to contain an error string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Body of a successful response.
    Content(String),
    /// Why no body could be obtained.
    Failed(FetchError),
}

impl FetchOutcome {
    /// The body, if the fetch succeeded.
    pub fn content(&self) -> Option<&str> {
        match self {
            FetchOutcome::Content(body) => Some(body),
            FetchOutcome::Failed(_) => None,
        }
    }
}

/// Fetches page markup, folding every failure into [`FetchOutcome::Failed`].
pub async fn fetch_content(http: &dyn HttpFetch, url: &Url) -> FetchOutcome {
    match http.get_text(url).await {
        Ok(body) => {
            debug!(url = %url, bytes = body.len(), "fetched page");
            FetchOutcome::Content(body)
        }
        Err(err) => {
            warn!(url = %url, error = %err, "page fetch failed");
            FetchOutcome::Failed(err)
        }
    }
}

/// Fetches `url` and decodes the body as JSON.
pub async fn fetch_json<T>(
    http: &dyn HttpFetch,
    url: &Url,
) -> Result<T, ProviderError>
where
    T: DeserializeOwned,
{
    let body = http.get_text(url).await?;
    serde_json::from_str(&body).map_err(ProviderError::from)
}

/// [`HttpFetch`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl fmt::Debug for ReqwestFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestFetcher")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ReqwestFetcher {
    /// Builds a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::from(err)
        }
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|err| self.classify(err))
    }
}
