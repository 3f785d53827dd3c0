//! Configuration loading for boxdarr.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables (with `.env` support via `dotenvy`). The result is a
//! validated [`Config`] plus non-fatal [`ConfigWarnings`] for the binary to
//! log at startup.

/// File discovery and layering.
pub mod loader;
/// Resolved configuration and its raw sources.
pub mod models;
/// Parsing helpers for raw values.
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    Config, ConfigMetadata, CorsConfig, LetterboxdConfig, OmdbConfig,
    ServerConfig, TmdbConfig, XConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
