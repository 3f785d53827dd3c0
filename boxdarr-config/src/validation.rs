//! Post-merge checks. Hard failures abort startup, everything else is
//! surfaced as a [`ConfigWarning`] with a hint on how to fix it.

use std::fmt;

use crate::{loader::error::ConfigLoadError, models::Config};

/// A setting that works but is probably not what was intended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// What was noticed.
    pub message: String,
    /// How to fix it.
    pub hint: Option<String>,
}

impl ConfigWarning {
    /// Warning without a hint.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
        }
    }

    /// Attaches a fix suggestion.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {hint})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Warnings in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    /// Collected warnings.
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    /// Appends a warning.
    pub fn push(&mut self, warning: ConfigWarning) {
        self.items.push(warning);
    }

    /// Whether nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ConfigWarnings {
    type Item = &'a ConfigWarning;
    type IntoIter = std::slice::Iter<'a, ConfigWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Rejects unusable settings and collects warnings for questionable ones.
pub fn validate(config: &Config) -> Result<ConfigWarnings, ConfigLoadError> {
    if config.pipeline.max_concurrency == 0 {
        return Err(ConfigLoadError::Invalid {
            field: "pipeline.max_concurrency",
            reason: "must be at least 1".to_string(),
        });
    }
    if config.pipeline.call_timeout.is_zero() {
        return Err(ConfigLoadError::Invalid {
            field: "pipeline.call_timeout",
            reason: "must be greater than zero".to_string(),
        });
    }

    let mut warnings = ConfigWarnings::default();

    if config.omdb.api_key.is_none() {
        warnings.push(
            ConfigWarning::new(
                "OMDb API key missing; every ratings lookup will fail",
            )
            .with_hint("set OMDB_API_KEY or [omdb] api_key"),
        );
    }
    if config.tmdb.api_key.is_none() {
        warnings.push(
            ConfigWarning::new(
                "TMDb API key missing; every catalog search will fail",
            )
            .with_hint("set TMDB_API_KEY or [tmdb] api_key"),
        );
    }
    if config.x.bearer_token.is_none() && !config.x.oauth_enabled() {
        warnings.push(
            ConfigWarning::new(
                "no X credentials configured; webhook events will not be published",
            )
            .with_hint("set X_BEARER_TOKEN or X_CLIENT_ID/X_CLIENT_SECRET"),
        );
    }
    if config.x.oauth_enabled() && config.x.client_secret.is_none() {
        warnings.push(
            ConfigWarning::new(
                "X client id set without a secret; token exchange runs as a public client",
            )
            .with_hint("set X_CLIENT_SECRET for confidential clients"),
        );
    }

    Ok(warnings)
}
