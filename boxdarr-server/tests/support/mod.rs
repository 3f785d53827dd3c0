#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::Router;
use boxdarr_config::CorsConfig;
use boxdarr_core::{
    CatalogQuery, CatalogRecord, CatalogSearch, Enricher, FetchError,
    HttpFetch, LetterboxdClient, ListingExtractor, ListingSelectors, Pipeline,
    PipelineSettings, ProviderError, RatingsRecord, RatingsSource, service,
};
use boxdarr_server::{
    AppState,
    infra::store::{KeyValueStore, MemoryStore},
    notify::{
        PublishError, StatusPublisher,
        oauth::{OAuthError, OAuthFlow, TokenSet},
    },
    routes::create_app,
};
use url::Url;

pub const BASE: &str = "https://letterboxd.com";

/// Canned page bodies keyed by full URL; anything else is a 404.
#[derive(Default)]
pub struct StubHttp {
    pages: Mutex<HashMap<String, String>>,
}

impl StubHttp {
    pub fn page(&self, url: &str, body: impl Into<String>) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
    }
}

#[async_trait]
impl HttpFetch for StubHttp {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        self.pages
            .lock()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}

/// Every title is a 2000 movie with an id derived from its length.
pub struct EchoRatings;

#[async_trait]
impl RatingsSource for EchoRatings {
    async fn lookup(
        &self,
        title: &str,
        _year: Option<u16>,
    ) -> Result<RatingsRecord, ProviderError> {
        Ok(RatingsRecord {
            title: Some(title.to_string()),
            year: Some("2000".to_string()),
            imdb_id: Some(format!("tt{:07}", title.len())),
            kind: Some("movie".to_string()),
            response: "True".to_string(),
            ..RatingsRecord::default()
        })
    }

    fn name(&self) -> &'static str {
        service::OMDB
    }
}

pub struct EmptyCatalog;

#[async_trait]
impl CatalogSearch for EmptyCatalog {
    async fn search_first(
        &self,
        _query: &CatalogQuery,
    ) -> Result<Option<CatalogRecord>, ProviderError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        service::TMDB
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub messages: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusPublisher for RecordingPublisher {
    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Rejected {
                status: 403,
                body: "forbidden".to_string(),
            });
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Accepts any code and remembers the verifier it was given.
#[derive(Default)]
pub struct StubOAuth {
    pub exchanges: AtomicUsize,
    pub last_verifier: Mutex<Option<String>>,
}

#[async_trait]
impl OAuthFlow for StubOAuth {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> Url {
        let mut url = Url::parse("https://x.test/i/oauth2/authorize").unwrap();
        url.query_pairs_mut()
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
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        *self.last_verifier.lock().unwrap() = Some(code_verifier.to_string());
        Ok(TokenSet {
            access_token: format!("access-{code}"),
            refresh_token: Some(format!("refresh-{code}")),
            expires_in: Some(7200),
            scope: None,
        })
    }
}

pub fn listing_page(endpoints: &[&str]) -> String {
    let items: String = endpoints
        .iter()
        .map(|endpoint| {
            format!(
                r#"<li class="poster-container"><div class="really-lazy-load" data-production-data-endpoint="{endpoint}"></div></li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{items}</ul></body></html>")
}

pub fn detail_json(id: u64, name: &str, year: u16) -> String {
    serde_json::json!({
        "result": true,
        "id": id,
        "name": name,
        "releaseYear": year,
        "slug": name.to_lowercase(),
        "url": format!("/film/{}/", name.to_lowercase()),
        "directors": []
    })
    .to_string()
}

pub struct Harness {
    pub http: Arc<StubHttp>,
    pub publisher: Arc<RecordingPublisher>,
    pub store: Arc<MemoryStore>,
    pub oauth: Option<Arc<StubOAuth>>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            http: Arc::new(StubHttp::default()),
            publisher: Arc::new(RecordingPublisher::default()),
            store: Arc::new(MemoryStore::new()),
            oauth: Some(Arc::new(StubOAuth::default())),
        }
    }

    pub fn with_publisher(mut self, publisher: RecordingPublisher) -> Self {
        self.publisher = Arc::new(publisher);
        self
    }

    pub fn without_oauth(mut self) -> Self {
        self.oauth = None;
        self
    }

    pub fn app(&self) -> Router {
        let settings = PipelineSettings {
            max_concurrency: 4,
            call_timeout: Duration::from_secs(5),
        };
        let letterboxd =
            LetterboxdClient::new(self.http.clone(), Url::parse(BASE).unwrap());
        let extractor =
            ListingExtractor::new(&ListingSelectors::default()).unwrap();
        let enricher = Enricher::new(
            Arc::new(EchoRatings),
            Arc::new(EmptyCatalog),
            settings.call_timeout,
        );
        let pipeline = Pipeline::new(letterboxd, extractor, enricher, settings);

        let store: Arc<dyn KeyValueStore> = self.store.clone();
        let oauth = self
            .oauth
            .clone()
            .map(|oauth| oauth as Arc<dyn OAuthFlow>);
        let state = AppState::new(
            Arc::new(pipeline),
            self.publisher.clone(),
            store,
            oauth,
        );

        create_app(state, &CorsConfig::default())
    }
}
