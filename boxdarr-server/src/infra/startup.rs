//! Wiring of concrete clients from a loaded [`Config`].

use std::sync::Arc;

use anyhow::Context;
use boxdarr_config::Config;
use boxdarr_core::{
    CatalogSearch, Enricher, HttpFetch, LetterboxdClient, ListingExtractor,
    OmdbClient, Pipeline, RatingsSource, ReqwestFetcher, TmdbCatalog,
};
use tracing::info;

use crate::{
    infra::{
        app_state::AppState,
        store::{KeyValueStore, MemoryStore},
    },
    notify::{
        StatusPublisher, XPublisher,
        oauth::{OAuthFlow, XOAuthClient},
    },
};

pub fn build_pipeline(
    config: &Config,
    http: Arc<dyn HttpFetch>,
) -> anyhow::Result<Pipeline> {
    let letterboxd =
        LetterboxdClient::new(http.clone(), config.letterboxd.base_url.clone());
    let extractor = ListingExtractor::new(&config.letterboxd.selectors)
        .context("invalid listing selectors")?;

    let ratings: Arc<dyn RatingsSource> = Arc::new(OmdbClient::new(
        http,
        config.omdb.base_url.clone(),
        config.omdb.api_key.clone().unwrap_or_default(),
    ));
    let catalog: Arc<dyn CatalogSearch> = Arc::new(TmdbCatalog::new(
        config.tmdb.api_key.clone().unwrap_or_default(),
        config.tmdb.language.clone(),
    ));

    let enricher =
        Enricher::new(ratings, catalog, config.pipeline.call_timeout);

    Ok(Pipeline::new(letterboxd, extractor, enricher, config.pipeline))
}

/// Builds the production [`AppState`]: reqwest-backed fetchers, the X
/// publisher and, when a client id is configured, the OAuth client.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let fetcher = ReqwestFetcher::new(config.pipeline.call_timeout)
        .context("failed to build HTTP client")?;
    let pipeline = build_pipeline(config, Arc::new(fetcher))?;

    let http = reqwest::Client::builder()
        .timeout(config.pipeline.call_timeout)
        .build()
        .context("failed to build X client")?;

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let publisher: Arc<dyn StatusPublisher> = Arc::new(
        XPublisher::new(
            http.clone(),
            &config.x.api_base,
            config.x.bearer_token.clone(),
            store.clone(),
        )
        .context("invalid X API base")?,
    );

    let oauth: Option<Arc<dyn OAuthFlow>> = if config.x.oauth_enabled() {
        let client = XOAuthClient::from_config(http, &config.x)
            .context("failed to build X OAuth client")?;
        Some(Arc::new(client))
    } else {
        info!("X OAuth login disabled (no client id)");
        None
    };

    Ok(AppState::new(Arc::new(pipeline), publisher, store, oauth))
}
