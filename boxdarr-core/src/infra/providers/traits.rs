use async_trait::async_trait;

use crate::{
    domain::{CatalogQuery, CatalogRecord, RatingsRecord},
    error::ProviderError,
};

/// Ratings/plot database keyed by title and year (OMDb).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingsSource: Send + Sync {
    /// Looks up one title. `Ok` means the provider answered; callers still
    /// have to inspect the response flag.
    async fn lookup(
        &self,
        title: &str,
        year: Option<u16>,
    ) -> Result<RatingsRecord, ProviderError>;

    /// Service name used in error attribution.
    fn name(&self) -> &'static str;
}

/// Media-catalog search service (TMDb).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Returns the first search hit, or `None` for an empty result list.
    async fn search_first(
        &self,
        query: &CatalogQuery,
    ) -> Result<Option<CatalogRecord>, ProviderError>;

    /// Service name used in error attribution.
    fn name(&self) -> &'static str;
}
