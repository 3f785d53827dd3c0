use std::{fmt, sync::Arc};

use url::Url;

use crate::{
    domain::ResolvedTitle,
    error::ProviderError,
    infra::http::{FetchOutcome, HttpFetch, fetch_content, fetch_json},
};

/// Public Letterboxd host.
pub const LETTERBOXD_BASE: &str = "https://letterboxd.com";

/// Letterboxd access: listing pages and per-film production data.
#[derive(Clone)]
pub struct LetterboxdClient {
    http: Arc<dyn HttpFetch>,
    base_url: Url,
}

impl fmt::Debug for LetterboxdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LetterboxdClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl LetterboxdClient {
    /// Client rooted at `base_url`; every request stays on its origin.
    pub fn new(http: Arc<dyn HttpFetch>, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The shared fetch capability.
    pub fn http(&self) -> &Arc<dyn HttpFetch> {
        &self.http
    }

    /// `https://letterboxd.com/{path}` for a listing path such as
    /// `someone/watchlist/`. The path is always placed under the base URL;
    /// anything that would resolve to another origin is rejected.
    pub fn listing_url(&self, path: &str) -> Result<Url, ProviderError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let raw = format!("{base}/{}", path.trim_start_matches('/'));
        let url = Url::parse(&raw).map_err(|e| {
            ProviderError::Api(format!("Invalid listing path {path}: {e}"))
        })?;
        self.same_origin(url)
    }

    /// Detail endpoints are host-relative (`/film/heat/json/`) and appended
    /// verbatim to the host.
    pub fn detail_url(&self, endpoint: &str) -> Result<Url, ProviderError> {
        if !endpoint.starts_with('/') {
            return Err(ProviderError::Api(format!(
                "Invalid detail endpoint {endpoint}: not host-relative"
            )));
        }

        let host = self.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{host}{endpoint}")).map_err(|e| {
            ProviderError::Api(format!("Invalid detail endpoint {endpoint}: {e}"))
        })?;
        self.same_origin(url)
    }

    fn same_origin(&self, url: Url) -> Result<Url, ProviderError> {
        if url.origin() == self.base_url.origin() {
            Ok(url)
        } else {
            Err(ProviderError::Api(format!(
                "Refusing to leave {}: {url}",
                self.base_url
            )))
        }
    }

    /// Fetches listing page markup.
    pub async fn fetch_listing(&self, url: &Url) -> FetchOutcome {
        fetch_content(self.http.as_ref(), url).await
    }

    /// Fetches the production-data record behind a detail endpoint. A record
    /// with `result: false` is reported as not found.
    pub async fn fetch_detail(
        &self,
        endpoint: &str,
    ) -> Result<ResolvedTitle, ProviderError> {
        if endpoint.trim().is_empty() {
            return Err(ProviderError::not_found("Missing detail endpoint"));
        }

        let url = self.detail_url(endpoint)?;

        let title: ResolvedTitle = fetch_json(self.http.as_ref(), &url).await?;
        if !title.result {
            return Err(ProviderError::not_found("No results found"));
        }

        Ok(title)
    }
}
