//! OAuth 2.0 authorization-code flow with PKCE for the X account.

use std::fmt;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use boxdarr_config::XConfig;
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

const STATE_BYTES: usize = 32;
// 64 random bytes encode to 86 characters, inside the 43..=128 range RFC 7636
// allows for a verifier.
const VERIFIER_BYTES: usize = 64;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("X OAuth client is not configured")]
    NotConfigured,

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token endpoint answered {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("invalid OAuth endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Tokens returned by a successful code exchange.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

fn random_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_state() -> String {
    random_token(STATE_BYTES)
}

pub fn generate_code_verifier() -> String {
    random_token(VERIFIER_BYTES)
}

/// S256 code challenge for `verifier`.
pub fn code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

#[async_trait]
pub trait OAuthFlow: Send + Sync {
    /// Where to send the user to grant access.
    fn authorize_url(&self, state: &str, code_challenge: &str) -> Url;

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, OAuthError>;
}

#[derive(Clone)]
pub struct XOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: Option<String>,
    authorize_url: Url,
    token_url: Url,
    redirect_uri: Url,
    scopes: Vec<String>,
}

impl fmt::Debug for XOAuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XOAuthClient")
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url.as_str())
            .field("redirect_uri", &self.redirect_uri.as_str())
            .finish_non_exhaustive()
    }
}

impl XOAuthClient {
    pub fn from_config(
        http: reqwest::Client,
        config: &XConfig,
    ) -> Result<Self, OAuthError> {
        let client_id = config.client_id.clone().ok_or(OAuthError::NotConfigured)?;

        Ok(Self {
            http,
            client_id,
            client_secret: config.client_secret.clone(),
            authorize_url: config.authorize_url.clone(),
            token_url: config.api_base.join("2/oauth2/token")?,
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
        })
    }
}

#[async_trait]
impl OAuthFlow for XOAuthClient {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> Url {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_uri.as_str())
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "S256");
        url
    }

    async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<TokenSet, OAuthError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
            ("client_id", self.client_id.as_str()),
        ];

        let mut request = self.http.post(self.token_url.clone()).form(&form);
        if let Some(secret) = &self.client_secret {
            request = request.basic_auth(&self.client_id, Some(secret));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<TokenSet>().await?)
    }
}
