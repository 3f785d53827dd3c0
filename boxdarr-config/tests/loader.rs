use std::{fs, time::Duration};

use boxdarr_config::{ConfigLoadError, ConfigLoader, EnvConfig};
use tempfile::TempDir;

fn write(dir: &TempDir, relative: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn keys() -> EnvConfig {
    EnvConfig {
        omdb_api_key: Some("omdb".into()),
        tmdb_api_key: Some("tmdb".into()),
        x_bearer_token: Some("bearer".into()),
        ..EnvConfig::default()
    }
}

#[test]
fn finds_config_in_fallback_location() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "config/boxdarr.toml",
        r#"
        [server]
        port = 8123

        [letterboxd]
        base_url = "http://127.0.0.1:9000"
        item_selector = "li.griditem"

        [pipeline]
        max_concurrency = 2
        call_timeout = "750ms"
        "#,
    );

    let load = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(keys())
        .unwrap();
    let config = load.config;

    assert_eq!(config.metadata.config_path.as_deref(), Some(path.as_path()));
    assert!(!config.metadata.env_file_loaded);
    assert_eq!(config.server.port, 8123);
    assert_eq!(config.letterboxd.base_url.as_str(), "http://127.0.0.1:9000/");
    assert_eq!(config.letterboxd.selectors.item, "li.griditem");
    assert_eq!(config.letterboxd.selectors.endpoint, "div.really-lazy-load");
    assert_eq!(config.pipeline.max_concurrency, 2);
    assert_eq!(config.pipeline.call_timeout, Duration::from_millis(750));
    assert!(load.warnings.is_empty());
}

#[test]
fn root_file_wins_over_config_dir() {
    let dir = TempDir::new().unwrap();
    write(&dir, "config/boxdarr.toml", "[server]\nport = 1\n");
    write(&dir, "boxdarr.toml", "[server]\nport = 2\n");

    let config = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(keys())
        .unwrap()
        .config;

    assert_eq!(config.server.port, 2);
}

#[test]
fn env_config_path_must_exist() {
    let dir = TempDir::new().unwrap();
    let env = EnvConfig {
        config_path: Some(dir.path().join("absent.toml")),
        ..keys()
    };

    let err = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(env)
        .unwrap_err();

    assert!(matches!(err, ConfigLoadError::MissingFile { .. }));
}

#[test]
fn malformed_toml_reports_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.toml", "[server\nport = ");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from(keys())
        .unwrap_err();

    assert!(matches!(err, ConfigLoadError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn zero_concurrency_is_rejected() {
    let dir = TempDir::new().unwrap();
    let env = EnvConfig {
        pipeline_max_concurrency: Some(0),
        ..keys()
    };

    let err = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(env)
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigLoadError::Invalid { field: "pipeline.max_concurrency", .. }
    ));
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    let env = EnvConfig {
        pipeline_call_timeout: Some("0s".into()),
        ..keys()
    };

    let err = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(env)
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigLoadError::Invalid { field: "pipeline.call_timeout", .. }
    ));
}

#[test]
fn missing_credentials_produce_hinted_warnings() {
    let dir = TempDir::new().unwrap();

    let load = ConfigLoader::new()
        .with_search_root(dir.path())
        .load_from(EnvConfig::default())
        .unwrap();

    assert_eq!(load.warnings.len(), 3);
    assert!(load.warnings.iter().all(|w| w.hint.is_some()));
    let messages: Vec<_> =
        load.warnings.iter().map(|w| w.message.as_str()).collect();
    assert!(messages[0].contains("OMDb"));
    assert!(messages[1].contains("TMDb"));
    assert!(messages[2].contains("X credentials"));
}
