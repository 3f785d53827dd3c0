/// Raw TOML and environment inputs.
pub mod sources;

use std::{fmt, path::PathBuf};

use boxdarr_core::{ListingSelectors, PipelineSettings};
use url::Url;

/// Listen address when none is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Listen port when none is configured.
pub const DEFAULT_PORT: u16 = 3000;
/// X API v2 root.
pub const X_API_BASE: &str = "https://api.x.com/";
/// X OAuth 2.0 consent page.
pub const X_AUTHORIZE_URL: &str = "https://x.com/i/oauth2/authorize";
/// OAuth callback served by this application.
pub const X_REDIRECT_URI: &str =
    "http://localhost:3000/api/auth/twitter/callback";
/// Scopes requested during authorization.
pub const X_SCOPES: [&str; 4] =
    ["tweet.read", "tweet.write", "users.read", "offline.access"];

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Cross-origin policy.
    pub cors: CorsConfig,
    /// Listing source.
    pub letterboxd: LetterboxdConfig,
    /// Ratings provider.
    pub omdb: OmdbConfig,
    /// Catalog provider.
    pub tmdb: TmdbConfig,
    /// Concurrency and timeouts.
    pub pipeline: PipelineSettings,
    /// Status publishing.
    pub x: XConfig,
    /// Where the values came from.
    pub metadata: ConfigMetadata,
}

impl Config {
    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Empty `allowed_origins` means any origin is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Exact origins, e.g. `http://localhost:7878`.
    pub allowed_origins: Vec<String>,
}

/// Where and how listings are scraped.
#[derive(Debug, Clone)]
pub struct LetterboxdConfig {
    /// Site root; every request stays on its origin.
    pub base_url: Url,
    /// Listing markup selectors.
    pub selectors: ListingSelectors,
}

/// OMDb access.
#[derive(Clone)]
pub struct OmdbConfig {
    /// API endpoint.
    pub base_url: Url,
    /// Required for ratings lookups.
    pub api_key: Option<String>,
}

impl fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// TMDb access.
#[derive(Clone)]
pub struct TmdbConfig {
    /// Required for catalog searches.
    pub api_key: Option<String>,
    /// Result language, e.g. `en-US`.
    pub language: Option<String>,
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .finish()
    }
}

/// Credentials and endpoints for posting statuses to X.
#[derive(Clone)]
pub struct XConfig {
    /// API root used for posting.
    pub api_base: Url,
    /// OAuth consent page.
    pub authorize_url: Url,
    /// OAuth callback.
    pub redirect_uri: Url,
    /// Requested scopes.
    pub scopes: Vec<String>,
    /// Fallback token when no OAuth token is stored.
    pub bearer_token: Option<String>,
    /// OAuth client id; enables the authorization flow.
    pub client_id: Option<String>,
    /// OAuth client secret for confidential clients.
    pub client_secret: Option<String>,
}

impl XConfig {
    /// Whether the OAuth routes can work.
    pub fn oauth_enabled(&self) -> bool {
        self.client_id.is_some()
    }
}

impl fmt::Debug for XConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("XConfig")
            .field("api_base", &self.api_base.as_str())
            .field("authorize_url", &self.authorize_url.as_str())
            .field("redirect_uri", &self.redirect_uri.as_str())
            .field("scopes", &self.scopes)
            .field("bearer_token", &redacted(&self.bearer_token))
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .finish()
    }
}

/// Provenance of a [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    /// TOML file that was read, if any.
    pub config_path: Option<PathBuf>,
    /// Whether a `.env` file was applied.
    pub env_file_loaded: bool,
}
