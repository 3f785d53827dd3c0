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
use boxdarr_core::{
    CatalogQuery, CatalogRecord, CatalogSearch, Enricher, FetchError,
    HttpFetch, LetterboxdClient, ListingExtractor, ListingSelectors, Pipeline,
    PipelineSettings, ProviderError, RatingsRecord, RatingsSource, service,
};
use url::Url;

pub const BASE: &str = "https://letterboxd.com";

#[derive(Clone)]
struct Route {
    body: Result<String, FetchError>,
    delay: Duration,
}

/// Canned HTTP responses keyed by full URL, with per-route latency.
#[derive(Default)]
pub struct StubHttp {
    routes: Mutex<HashMap<String, Route>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
    pub requested: Mutex<Vec<String>>,
}

impl StubHttp {
    pub fn route(&self, url: &str, body: impl Into<String>, delay_ms: u64) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Route {
                body: Ok(body.into()),
                delay: Duration::from_millis(delay_ms),
            },
        );
    }

    pub fn fail(&self, url: &str, err: FetchError) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Route {
                body: Err(err),
                delay: Duration::ZERO,
            },
        );
    }

    pub fn stall(&self, url: &str) {
        self.routes.lock().unwrap().insert(
            url.to_string(),
            Route {
                body: Ok(String::new()),
                delay: Duration::from_secs(24 * 60 * 60),
            },
        );
    }
}

#[async_trait]
impl HttpFetch for StubHttp {
    async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(url.to_string());
        let route = self.routes.lock().unwrap().get(url.as_str()).cloned();
        let Some(route) = route else {
            return Err(FetchError::Status(404));
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(route.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        route.body
    }
}

/// OMDb stand-in answering from a title → record table.
#[derive(Default)]
pub struct StubRatings {
    records: Mutex<HashMap<String, RatingsRecord>>,
    pub calls: AtomicUsize,
}

impl StubRatings {
    pub fn movie(&self, title: &str, year: &str, imdb: &str) {
        self.records.lock().unwrap().insert(
            title.to_string(),
            RatingsRecord {
                title: Some(title.to_string()),
                year: Some(year.to_string()),
                imdb_id: Some(imdb.to_string()),
                kind: Some("movie".to_string()),
                response: "True".to_string(),
                ..RatingsRecord::default()
            },
        );
    }
}

#[async_trait]
impl RatingsSource for StubRatings {
    async fn lookup(
        &self,
        title: &str,
        _year: Option<u16>,
    ) -> Result<RatingsRecord, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let record = self.records.lock().unwrap().get(title).cloned();
        Ok(record.unwrap_or_else(|| RatingsRecord {
            response: "False".to_string(),
            error: Some("Movie not found!".to_string()),
            ..RatingsRecord::default()
        }))
    }

    fn name(&self) -> &'static str {
        service::OMDB
    }
}

/// TMDb stand-in; `fail_all` turns every search into a transport error.
#[derive(Default)]
pub struct StubCatalog {
    ids: Mutex<HashMap<String, u64>>,
    pub fail_all: bool,
    pub calls: AtomicUsize,
}

impl StubCatalog {
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn movie(&self, title: &str, id: u64) {
        self.ids.lock().unwrap().insert(title.to_string(), id);
    }
}

#[async_trait]
impl CatalogSearch for StubCatalog {
    async fn search_first(
        &self,
        query: &CatalogQuery,
    ) -> Result<Option<CatalogRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all {
            return Err(ProviderError::Fetch(FetchError::Transport(
                "connection refused".to_string(),
            )));
        }

        let id = self.ids.lock().unwrap().get(&query.query).copied();
        Ok(id.map(|id| CatalogRecord {
            id,
            title: query.query.clone(),
            original_title: query.query.clone(),
            release_date: None,
            popularity: 10.0,
            vote_average: 7.5,
            vote_count: 100,
            adult: false,
        }))
    }

    fn name(&self) -> &'static str {
        service::TMDB
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
        "originalName": null,
        "releaseYear": year,
        "runTime": 120,
        "slug": name.to_lowercase().replace(' ', "-"),
        "url": format!("/film/{}/", name.to_lowercase().replace(' ', "-")),
        "directors": [{ "name": "Someone" }]
    })
    .to_string()
}

pub fn pipeline(
    http: Arc<StubHttp>,
    ratings: Arc<StubRatings>,
    catalog: Arc<StubCatalog>,
    settings: PipelineSettings,
) -> Pipeline {
    let letterboxd = LetterboxdClient::new(http, Url::parse(BASE).unwrap());
    let extractor = ListingExtractor::new(&ListingSelectors::default()).unwrap();
    let enricher = Enricher::new(ratings, catalog, settings.call_timeout);
    Pipeline::new(letterboxd, extractor, enricher, settings)
}
