//! Core library for boxdarr.
//!
//! Scrapes a Letterboxd listing, enriches every film with OMDb and TMDb data
//! and reconciles the results into records Radarr can import. Every upstream
//! call is reached through an injected capability ([`HttpFetch`],
//! [`RatingsSource`], [`CatalogSearch`]) so the pipeline can run against
//! canned responses.

pub mod domain;
/// Fetch and provider error types.
pub mod error;
pub mod infra;
pub mod pipeline;

pub use domain::*;
pub use error::{FetchError, ProviderError};
pub use infra::http::{FetchOutcome, HttpFetch, ReqwestFetcher};
pub use infra::providers::{
    CatalogSearch, LetterboxdClient, OmdbClient, RatingsSource, TmdbCatalog,
};
pub use pipeline::{
    Enricher, ListingExtractor, ListingSelectors, Pipeline, PipelineSettings,
};
