use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use super::{PublishError, StatusPublisher};
use crate::infra::store::{KeyValueStore, keys};

/// Posts statuses through the X v2 API.
///
/// The OAuth user token stored by the login flow is preferred; the configured
/// bearer token is used when no login has happened yet.
#[derive(Clone)]
pub struct XPublisher {
    http: reqwest::Client,
    endpoint: Url,
    bearer_token: Option<String>,
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for XPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XPublisher")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_bearer_token", &self.bearer_token.is_some())
            .finish_non_exhaustive()
    }
}

impl XPublisher {
    pub fn new(
        http: reqwest::Client,
        api_base: &Url,
        bearer_token: Option<String>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            endpoint: api_base.join("2/tweets")?,
            bearer_token,
            store,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn token(&self) -> Result<String, PublishError> {
        let stored = self
            .store
            .get(keys::ACCESS_TOKEN)
            .await?
            .filter(|token| !token.is_empty());

        stored
            .or_else(|| self.bearer_token.clone())
            .ok_or(PublishError::MissingCredentials)
    }
}

#[async_trait]
impl StatusPublisher for XPublisher {
    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        let token = self.token().await?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(token)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "status rejected");
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(chars = text.chars().count(), "status published");
        Ok(())
    }
}
