use std::fmt;

use async_trait::async_trait;
use tmdb_api::{
    client::{Client, reqwest::Client as ReqwestClient},
    movie::{MovieShort, search::Params as MovieSearchParams},
};

use super::traits::CatalogSearch;
use crate::{
    domain::{CatalogQuery, CatalogRecord, service},
    error::ProviderError,
};

/// [`CatalogSearch`] backed by TMDb's movie search.
pub struct TmdbCatalog {
    client: Client<ReqwestClient>,
    language: Option<String>,
}

impl fmt::Debug for TmdbCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbCatalog")
            .field("client", &"tmdb_api::Client<ReqwestExecutor>")
            .field("language", &self.language)
            .finish()
    }
}

impl TmdbCatalog {
    /// Client authenticating with `api_key`; `language` localises titles.
    pub fn new(api_key: String, language: Option<String>) -> Self {
        Self {
            client: Client::<ReqwestClient>::new(api_key),
            language,
        }
    }
}

impl From<MovieShort> for CatalogRecord {
    fn from(movie: MovieShort) -> Self {
        let inner = movie.inner;
        CatalogRecord {
            id: inner.id,
            title: inner.title,
            original_title: inner.original_title,
            release_date: inner.release_date,
            popularity: inner.popularity,
            vote_average: inner.vote_average,
            vote_count: inner.vote_count,
            adult: inner.adult,
        }
    }
}

#[async_trait]
impl CatalogSearch for TmdbCatalog {
    async fn search_first(
        &self,
        query: &CatalogQuery,
    ) -> Result<Option<CatalogRecord>, ProviderError> {
        let params = MovieSearchParams {
            year: query.year,
            language: self.language.clone().map(Into::into),
            ..Default::default()
        };

        tracing::debug!(query = %query.query, year = ?query.year, "TMDB movie search");

        let page = self
            .client
            .search_movies(&query.query, &params)
            .await
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        Ok(page.results.into_iter().next().map(CatalogRecord::from))
    }

    fn name(&self) -> &'static str {
        service::TMDB
    }
}
