use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::{non_blank, parse_csv};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    /// `[server]` table.
    #[serde(default)]
    pub server: FileServerConfig,
    /// `[cors]` table.
    #[serde(default)]
    pub cors: FileCorsConfig,
    /// `[letterboxd]` table.
    #[serde(default)]
    pub letterboxd: FileLetterboxdConfig,
    /// `[omdb]` table.
    #[serde(default)]
    pub omdb: FileOmdbConfig,
    /// `[tmdb]` table.
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    /// `[pipeline]` table.
    #[serde(default)]
    pub pipeline: FilePipelineConfig,
    /// `[x]` table.
    #[serde(default)]
    pub x: FileXConfig,
}

/// `[server]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    /// `server.host`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// `server.port`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// `[cors]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    /// `cors.allowed_origins`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,
}

/// `[letterboxd]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLetterboxdConfig {
    /// `letterboxd.base_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// `letterboxd.item_selector`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_selector: Option<String>,
    /// `letterboxd.endpoint_selector`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_selector: Option<String>,
    /// `letterboxd.endpoint_attribute`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_attribute: Option<String>,
}

/// `[omdb]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileOmdbConfig {
    /// `omdb.base_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// `omdb.api_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// `[tmdb]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    /// `tmdb.api_key`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// `tmdb.language`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// `[pipeline]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FilePipelineConfig {
    /// `pipeline.max_concurrency`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
    /// Humantime string, e.g. `"15s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_timeout: Option<String>,
}

/// `[x]` table.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileXConfig {
    /// `x.api_base`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// `x.authorize_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_url: Option<String>,
    /// `x.redirect_uri`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// `x.scopes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    /// `x.bearer_token`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// `x.client_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// `x.client_secret`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Overrides read from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    /// `BOXDARR_CONFIG_PATH`.
    pub config_path: Option<PathBuf>,
    /// `SERVER_HOST`.
    pub server_host: Option<String>,
    /// `SERVER_PORT`.
    pub server_port: Option<u16>,
    /// `CORS_ALLOWED_ORIGINS`.
    pub cors_allowed_origins: Option<Vec<String>>,
    /// `LETTERBOXD_BASE_URL`.
    pub letterboxd_base_url: Option<String>,
    /// `OMDB_API_KEY`.
    pub omdb_api_key: Option<String>,
    /// `OMDB_BASE_URL`.
    pub omdb_base_url: Option<String>,
    /// `TMDB_API_KEY`.
    pub tmdb_api_key: Option<String>,
    /// `TMDB_LANG`.
    pub tmdb_language: Option<String>,
    /// `PIPELINE_MAX_CONCURRENCY`.
    pub pipeline_max_concurrency: Option<usize>,
    /// `PIPELINE_CALL_TIMEOUT`.
    pub pipeline_call_timeout: Option<String>,
    /// `X_BEARER_TOKEN`.
    pub x_bearer_token: Option<String>,
    /// `X_CLIENT_ID`.
    pub x_client_id: Option<String>,
    /// `X_CLIENT_SECRET`.
    pub x_client_secret: Option<String>,
    /// `X_REDIRECT_URI`.
    pub x_redirect_uri: Option<String>,
}

impl EnvConfig {
    /// Reads the process environment.
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| non_blank(lookup(name));

        Self {
            config_path: var("BOXDARR_CONFIG_PATH").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT").and_then(|s| s.trim().parse().ok()),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_csv(&raw)),
            letterboxd_base_url: var("LETTERBOXD_BASE_URL"),
            omdb_api_key: var("OMDB_API_KEY"),
            omdb_base_url: var("OMDB_BASE_URL"),
            tmdb_api_key: var("TMDB_API_KEY"),
            tmdb_language: var("TMDB_LANG"),
            pipeline_max_concurrency: var("PIPELINE_MAX_CONCURRENCY")
                .and_then(|s| s.trim().parse().ok()),
            pipeline_call_timeout: var("PIPELINE_CALL_TIMEOUT"),
            x_bearer_token: var("X_BEARER_TOKEN"),
            x_client_id: var("X_CLIENT_ID"),
            x_client_secret: var("X_CLIENT_SECRET"),
            x_redirect_uri: var("X_REDIRECT_URI"),
        }
    }
}
