//! Concurrent OMDb/TMDb enrichment of a resolved title.

use std::{fmt, sync::Arc, time::Duration};

use tokio::time::timeout;

use super::candidates::{Attempt, TitleCandidates, first_success};
use crate::{
    domain::{
        CatalogQuery, CatalogRecord, RatingsRecord, ResolvedTitle,
        ServiceResult, guarded,
    },
    error::ProviderError,
    infra::providers::{CatalogSearch, RatingsSource},
};

/// Ratings message once every candidate was tried.
pub const RATINGS_EXHAUSTED: &str = "No results found or not a movie";
/// Catalog message for an empty search.
pub const CATALOG_EMPTY: &str = "No results found";
/// Message for stages skipped because the detail stage failed.
pub const UPSTREAM_UNAVAILABLE: &str = "Upstream title unavailable";

/// Both provider results for one title.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    /// OMDb result.
    pub ratings: ServiceResult<RatingsRecord>,
    /// TMDb result.
    pub catalog: ServiceResult<CatalogRecord>,
}

/// Runs the ratings and catalog lookups for a resolved title.
#[derive(Clone)]
pub struct Enricher {
    ratings: Arc<dyn RatingsSource>,
    catalog: Arc<dyn CatalogSearch>,
    call_timeout: Duration,
}

impl fmt::Debug for Enricher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enricher")
            .field("ratings", &self.ratings.name())
            .field("catalog", &self.catalog.name())
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

impl Enricher {
    /// Each single provider call gets `call_timeout`.
    pub fn new(
        ratings: Arc<dyn RatingsSource>,
        catalog: Arc<dyn CatalogSearch>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            ratings,
            catalog,
            call_timeout,
        }
    }

    /// Queries both providers concurrently. Without a resolved title neither
    /// provider is called and both results carry an upstream error.
    pub async fn enrich(
        &self,
        resolved: &ServiceResult<ResolvedTitle>,
    ) -> Enrichment {
        let title = match resolved {
            ServiceResult::Data(title) => title,
            ServiceResult::Error(_) => {
                return Enrichment {
                    ratings: ServiceResult::error(
                        self.ratings.name(),
                        UPSTREAM_UNAVAILABLE,
                    ),
                    catalog: ServiceResult::error(
                        self.catalog.name(),
                        UPSTREAM_UNAVAILABLE,
                    ),
                };
            }
        };

        let candidates = TitleCandidates::from_title(title);
        let (ratings, catalog) = tokio::join!(
            self.lookup_ratings(&candidates, title.release_year),
            self.search_catalog(&title.name, title.release_year),
        );

        Enrichment { ratings, catalog }
    }

    async fn lookup_ratings(
        &self,
        candidates: &TitleCandidates,
        year: Option<u16>,
    ) -> ServiceResult<RatingsRecord> {
        let limit = self.call_timeout;
        let result = first_success(
            candidates.as_slice(),
            RATINGS_EXHAUSTED,
            |candidate| async move {
                match timeout(limit, self.ratings.lookup(&candidate, year)).await
                {
                    Err(_) => Attempt::Failed(ProviderError::Timeout(limit)),
                    Ok(Ok(record)) if record.is_movie_match() => {
                        Attempt::Found(record)
                    }
                    Ok(Ok(_)) => Attempt::Rejected,
                    Ok(Err(err)) => Attempt::Failed(err),
                }
            },
        )
        .await;

        ServiceResult::from_result(self.ratings.name(), result)
    }

    /// Searches with the primary name only; alternates are a ratings
    /// concern.
    async fn search_catalog(
        &self,
        name: &str,
        year: Option<u16>,
    ) -> ServiceResult<CatalogRecord> {
        let service = self.catalog.name();
        let primary = name.trim();
        if primary.is_empty() {
            return ServiceResult::error(service, CATALOG_EMPTY);
        }

        let query = CatalogQuery {
            query: primary.to_string(),
            year,
        };

        guarded(service, self.call_timeout, async {
            self.catalog
                .search_first(&query)
                .await?
                .ok_or_else(|| ProviderError::not_found(CATALOG_EMPTY))
        })
        .await
    }
}
