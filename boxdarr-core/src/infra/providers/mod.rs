//! Clients for Letterboxd, OMDb and TMDb.

/// Listing and production-data access.
pub mod letterboxd;
/// Ratings lookup.
pub mod omdb;
/// Catalog search.
pub mod tmdb;
/// Provider seams.
pub mod traits;

pub use letterboxd::LetterboxdClient;
pub use omdb::OmdbClient;
pub use tmdb::TmdbCatalog;
pub use traits::{CatalogSearch, RatingsSource};
