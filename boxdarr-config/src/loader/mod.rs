/// Load failures.
pub mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use boxdarr_core::{
    ListingSelectors, PipelineSettings,
    infra::providers::{letterboxd::LETTERBOXD_BASE, omdb::OMDB_API_BASE},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    models::{
        Config, ConfigMetadata, CorsConfig, LetterboxdConfig, OmdbConfig,
        ServerConfig, TmdbConfig, X_API_BASE, X_AUTHORIZE_URL, X_REDIRECT_URI,
        X_SCOPES, XConfig,
        sources::{EnvConfig, FileConfig},
    },
    util::{non_blank, parse_duration},
    validation::{ConfigWarnings, validate},
};
use error::ConfigLoadError;

const SEARCH_PATHS: [&str; 2] = ["boxdarr.toml", "config/boxdarr.toml"];

/// A loaded configuration together with what validation flagged.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    /// Validated configuration.
    pub config: Config,
    /// Non-fatal findings to log at startup.
    pub warnings: ConfigWarnings,
}

/// Builds a [`Config`] from defaults, an optional TOML file and the
/// environment, in that order of precedence (later wins).
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    search_root: Option<PathBuf>,
    skip_env_file: bool,
}

impl ConfigLoader {
    /// Loader with default search locations and `.env` handling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit TOML path; takes precedence over `BOXDARR_CONFIG_PATH`.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Reads this file instead of `./.env`.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Leaves the environment as it is.
    pub fn skip_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    /// Directory the default config locations are resolved against.
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(root.into());
        self
    }

    /// Loads `.env`, the TOML file and the environment, then validates.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.load_env_file();
        self.load_with(EnvConfig::gather(), env_file_loaded)
    }

    /// Like [`ConfigLoader::load`] but with the environment supplied by the
    /// caller; the process environment and `.env` are left untouched.
    pub fn load_from(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        self.load_with(env, false)
    }

    fn load_with(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let config_path = self.locate_config(&env)?;
        let file = match &config_path {
            Some(path) => read_file(path)?,
            None => FileConfig::default(),
        };

        let metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };
        let config = resolve(file, env, metadata)?;
        let warnings = validate(&config)?;

        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> bool {
        if self.skip_env_file {
            return false;
        }

        let result = match &self.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| path.clone()),
            None => dotenvy::dotenv(),
        };

        match result {
            Ok(path) => {
                debug!(path = %path.display(), "loaded env file");
                true
            }
            Err(err) if err.not_found() => false,
            Err(err) => {
                warn!(error = %err, "failed to load env file");
                false
            }
        }
    }

    fn locate_config(
        &self,
        env: &EnvConfig,
    ) -> Result<Option<PathBuf>, ConfigLoadError> {
        if let Some(path) =
            self.config_path.as_ref().or(env.config_path.as_ref())
        {
            return if path.is_file() {
                Ok(Some(path.clone()))
            } else {
                Err(ConfigLoadError::MissingFile { path: path.clone() })
            };
        }

        let root = self.search_root.as_deref().unwrap_or(Path::new("."));
        Ok(SEARCH_PATHS
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.is_file()))
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_url(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<Url, ConfigLoadError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    let invalid = |reason: String| ConfigLoadError::InvalidUrl {
        field,
        value: raw.clone(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}

fn resolve(
    file: FileConfig,
    env: EnvConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let defaults = ServerConfig::default();
    let server = ServerConfig {
        host: env
            .server_host
            .or(non_blank(file.server.host))
            .unwrap_or(defaults.host),
        port: env.server_port.or(file.server.port).unwrap_or(defaults.port),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .unwrap_or(file.cors.allowed_origins),
    };

    let selector_defaults = ListingSelectors::default();
    let letterboxd = LetterboxdConfig {
        base_url: parse_url(
            "letterboxd.base_url",
            env.letterboxd_base_url
                .or(non_blank(file.letterboxd.base_url)),
            LETTERBOXD_BASE,
        )?,
        selectors: ListingSelectors {
            item: non_blank(file.letterboxd.item_selector)
                .unwrap_or(selector_defaults.item),
            endpoint: non_blank(file.letterboxd.endpoint_selector)
                .unwrap_or(selector_defaults.endpoint),
            attribute: non_blank(file.letterboxd.endpoint_attribute)
                .unwrap_or(selector_defaults.attribute),
        },
    };

    let omdb = OmdbConfig {
        base_url: parse_url(
            "omdb.base_url",
            env.omdb_base_url.or(non_blank(file.omdb.base_url)),
            OMDB_API_BASE,
        )?,
        api_key: env.omdb_api_key.or(non_blank(file.omdb.api_key)),
    };

    let tmdb = TmdbConfig {
        api_key: env.tmdb_api_key.or(non_blank(file.tmdb.api_key)),
        language: env.tmdb_language.or(non_blank(file.tmdb.language)),
    };

    let pipeline_defaults = PipelineSettings::default();
    let call_timeout = match env
        .pipeline_call_timeout
        .or(non_blank(file.pipeline.call_timeout))
    {
        Some(raw) => parse_timeout(raw)?,
        None => pipeline_defaults.call_timeout,
    };
    let pipeline = PipelineSettings {
        max_concurrency: env
            .pipeline_max_concurrency
            .or(file.pipeline.max_concurrency)
            .unwrap_or(pipeline_defaults.max_concurrency),
        call_timeout,
    };

    let x = XConfig {
        api_base: parse_url("x.api_base", non_blank(file.x.api_base), X_API_BASE)?,
        authorize_url: parse_url(
            "x.authorize_url",
            non_blank(file.x.authorize_url),
            X_AUTHORIZE_URL,
        )?,
        redirect_uri: parse_url(
            "x.redirect_uri",
            env.x_redirect_uri.or(non_blank(file.x.redirect_uri)),
            X_REDIRECT_URI,
        )?,
        scopes: file
            .x
            .scopes
            .unwrap_or_else(|| X_SCOPES.iter().map(|s| s.to_string()).collect()),
        bearer_token: env.x_bearer_token.or(non_blank(file.x.bearer_token)),
        client_id: env.x_client_id.or(non_blank(file.x.client_id)),
        client_secret: env.x_client_secret.or(non_blank(file.x.client_secret)),
    };

    Ok(Config {
        server,
        cors,
        letterboxd,
        omdb,
        tmdb,
        pipeline,
        x,
        metadata,
    })
}

fn parse_timeout(raw: String) -> Result<Duration, ConfigLoadError> {
    parse_duration(&raw).map_err(|source| ConfigLoadError::InvalidDuration {
        field: "pipeline.call_timeout",
        value: raw,
        source,
    })
}
