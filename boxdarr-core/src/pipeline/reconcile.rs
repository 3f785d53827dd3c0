//! Field-precedence merge of one item's results into an [`OutputRecord`].
//!
//! Every field takes the first source that has a non-empty value and falls
//! back to [`UNKNOWN`]. Later sources never override earlier ones.

use crate::domain::{
    CatalogRecord, OutputRecord, RatingsRecord, ResolvedTitle, ServiceError,
    ServiceResult, UNKNOWN,
};

fn first_available<I>(sources: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    sources
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.to_string()).filter(|v| !v.is_empty())
}

/// `"Ring:The Return"` becomes `"RingTheReturn"`.
pub fn clean_title(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Merges one item's stage results and collects their errors in stage order.
pub fn reconcile(
    resolved: &ServiceResult<ResolvedTitle>,
    ratings: &ServiceResult<RatingsRecord>,
    catalog: &ServiceResult<CatalogRecord>,
) -> OutputRecord {
    let title = resolved.data();
    let rating = ratings.data();
    let hit = catalog.data();

    OutputRecord {
        title: first_available([
            title.and_then(|t| non_empty(&t.name)),
            rating.and_then(|r| r.title.clone()),
        ]),
        release_year: first_available([
            title.and_then(|t| t.release_year).map(|y| y.to_string()),
            rating.and_then(|r| r.year.clone()),
        ]),
        imdb_id: first_available([rating.and_then(|r| r.imdb_id.clone())]),
        id: first_available([hit.map(|c| c.id.to_string())]),
        clean_title: first_available([
            title.map(|t| clean_title(&t.name))
        ]),
        adult: false,
        errors: collect_errors(resolved, ratings, catalog),
    }
}

fn collect_errors(
    resolved: &ServiceResult<ResolvedTitle>,
    ratings: &ServiceResult<RatingsRecord>,
    catalog: &ServiceResult<CatalogRecord>,
) -> Vec<ServiceError> {
    [
        resolved.service_error(),
        ratings.service_error(),
        catalog.service_error(),
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect()
}
