use std::path::PathBuf;

use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {} does not exist", path.display())]
    /// An explicitly requested file is absent.
    MissingFile {
        /// Requested path.
        path: PathBuf,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    /// The file exists but could not be read.
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    /// The file is not valid TOML for this schema.
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser error.
        source: toml::de::Error,
    },

    #[error("`{field}` is not a valid URL ({value}): {reason}")]
    /// A URL setting does not parse.
    InvalidUrl {
        /// Setting name.
        field: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    #[error("`{field}` is not a valid duration ({value}): {source}")]
    /// A duration setting does not parse.
    InvalidDuration {
        /// Setting name.
        field: &'static str,
        /// Raw value.
        value: String,
        /// Parser error.
        source: humantime::DurationError,
    },

    #[error("`{field}` {reason}")]
    /// A value parses but is out of range.
    Invalid {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
