use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::service_result::{ServiceError, ServiceResult};

/// Marker used in [`OutputRecord`] for every field no source could fill.
pub const UNKNOWN: &str = "Unknown";

/// One list item found on a listing page, before its details are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubRecord {
    /// Host-relative path of the film page, e.g. `/film/heat/`.
    pub detail_endpoint: String,
}

impl StubRecord {
    /// Wraps a detail endpoint as found on the listing page.
    pub fn new(detail_endpoint: impl Into<String>) -> Self {
        Self {
            detail_endpoint: detail_endpoint.into(),
        }
    }
}

/// Director credit on a [`ResolvedTitle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    /// Display name.
    pub name: String,
}

/// Letterboxd production-data record for one film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTitle {
    /// `false` when Letterboxd has no production data for the page.
    pub result: bool,
    /// Letterboxd film id.
    #[serde(default)]
    pub id: u64,
    /// Primary (usually English) title.
    #[serde(default)]
    pub name: String,
    /// Title in the original language, when it differs.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Release year.
    #[serde(default)]
    pub release_year: Option<u16>,
    /// Runtime in minutes.
    #[serde(default, rename = "runTime")]
    pub runtime: Option<u32>,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Film page URL.
    #[serde(default)]
    pub url: String,
    /// Director credits.
    #[serde(default)]
    pub directors: Vec<Director>,
}

/// OMDb title lookup response.
///
/// OMDb answers misses with HTTP 200 and `"Response": "False"`, so the flag is
/// the only reliable found/not-found signal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingsRecord {
    /// Title as OMDb knows it.
    #[serde(default)]
    pub title: Option<String>,
    /// Year, as text.
    #[serde(default)]
    pub year: Option<String>,
    /// Content rating.
    #[serde(default)]
    pub rated: Option<String>,
    /// Runtime, e.g. `"110 min"`.
    #[serde(default)]
    pub runtime: Option<String>,
    /// Comma separated genres.
    #[serde(default)]
    pub genre: Option<String>,
    /// Comma separated directors.
    #[serde(default)]
    pub director: Option<String>,
    /// Short plot summary.
    #[serde(default)]
    pub plot: Option<String>,
    /// Metacritic score.
    #[serde(default)]
    pub metascore: Option<String>,
    /// IMDb user rating.
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    /// IMDb vote count, with thousands separators.
    #[serde(default, rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    /// IMDb id, e.g. `tt0113277`.
    #[serde(default, rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// `movie`, `series` or `episode`.
    #[serde(default, rename = "Type")]
    pub kind: Option<String>,
    /// `"True"` or `"False"`.
    pub response: String,
    /// OMDb's own message on a miss.
    #[serde(default)]
    pub error: Option<String>,
}

impl RatingsRecord {
    /// Whether OMDb reported a hit.
    pub fn is_found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// A hit whose type is `movie`.
    pub fn is_movie_match(&self) -> bool {
        self.is_found() && self.kind.as_deref() == Some("movie")
    }
}

/// First TMDb search hit for a title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// TMDb movie id.
    pub id: u64,
    /// Localised title.
    pub title: String,
    /// Title in the original language.
    pub original_title: String,
    /// First release date.
    pub release_date: Option<NaiveDate>,
    /// TMDb popularity score.
    pub popularity: f64,
    /// Mean vote.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u64,
    /// Adult content flag.
    pub adult: bool,
}

/// Lookup key for a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Title to search for.
    pub query: String,
    /// Narrows the search when known.
    pub year: Option<u16>,
}

/// Record handed to Radarr's custom list import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Display title.
    pub title: String,
    /// Release year, as text.
    pub release_year: String,
    /// IMDb id.
    pub imdb_id: String,
    /// Canonical (TMDb) id.
    pub id: String,
    /// `title` with everything but letters and digits removed.
    pub clean_title: String,
    /// Always `false`.
    pub adult: bool,
    /// Per-service failures met on the way, in stage order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ServiceError>,
}

/// Full lineage of one listing item through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedItem {
    /// Listing entry the item came from.
    pub stub: StubRecord,
    /// Letterboxd detail stage.
    pub resolved: ServiceResult<ResolvedTitle>,
    /// OMDb stage.
    pub ratings: ServiceResult<RatingsRecord>,
    /// TMDb stage.
    pub catalog: ServiceResult<CatalogRecord>,
    /// Merged record.
    pub output: OutputRecord,
}
