//! Alternate lookup titles and the "first one that works" consumer.

use std::future::Future;

use crate::{domain::ResolvedTitle, error::ProviderError};

/// Ordered, de-duplicated lookup titles for one film.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleCandidates(Vec<String>);

impl TitleCandidates {
    /// Primary name, then the original name, then the part of the name
    /// before its first colon.
    pub fn from_title(title: &ResolvedTitle) -> Self {
        let mut candidates = Self::default();
        candidates.push(&title.name);
        if let Some(original) = &title.original_name {
            candidates.push(original);
        }
        if let Some((head, _)) = title.name.split_once(':') {
            candidates.push(head);
        }
        candidates
    }

    fn push(&mut self, raw: &str) {
        let candidate = raw.trim();
        if candidate.is_empty() || self.0.iter().any(|c| c == candidate) {
            return;
        }
        self.0.push(candidate.to_string());
    }

    /// Candidates in lookup order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether there is nothing to look up.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Outcome of one attempt in [`first_success`].
#[derive(Debug)]
pub enum Attempt<T> {
    /// Usable answer; stops the search.
    Found(T),
    /// The provider answered, but not with something usable.
    Rejected,
    /// No answer at all.
    Failed(ProviderError),
}

/// Tries `candidates` in order and returns the first [`Attempt::Found`].
/// Later candidates are never tried once one succeeds.
///
/// When nothing is found the last transport-level failure is returned, or
/// `exhausted` if every attempt was a plain rejection.
pub async fn first_success<T, F, Fut>(
    candidates: &[String],
    exhausted: &str,
    mut attempt: F,
) -> Result<T, ProviderError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let mut last_failure = None;

    for candidate in candidates {
        match attempt(candidate.clone()).await {
            Attempt::Found(value) => return Ok(value),
            Attempt::Rejected => {
                tracing::trace!(candidate = %candidate, "candidate rejected");
            }
            Attempt::Failed(err) => {
                tracing::debug!(candidate = %candidate, error = %err, "candidate lookup failed");
                last_failure = Some(err);
            }
        }
    }

    Err(last_failure.unwrap_or_else(|| ProviderError::not_found(exhausted)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn title(name: &str, original: Option<&str>) -> ResolvedTitle {
        ResolvedTitle {
            result: true,
            id: 1,
            name: name.to_string(),
            original_name: original.map(ToString::to_string),
            release_year: Some(2001),
            runtime: None,
            slug: String::new(),
            url: String::new(),
            directors: Vec::new(),
        }
    }

    #[test]
    fn candidates_follow_name_original_then_pre_colon() {
        let c = TitleCandidates::from_title(&title(
            "Amélie: The Fabulous Destiny",
            Some("Le Fabuleux Destin d'Amélie Poulain"),
        ));
        assert_eq!(
            c.as_slice(),
            [
                "Amélie: The Fabulous Destiny",
                "Le Fabuleux Destin d'Amélie Poulain",
                "Amélie",
            ]
        );
    }

    #[test]
    fn duplicate_and_empty_candidates_are_dropped() {
        let c = TitleCandidates::from_title(&title("Heat", Some("Heat")));
        assert_eq!(c.as_slice(), ["Heat"]);

        let c = TitleCandidates::from_title(&title(": Prologue", None));
        assert_eq!(c.as_slice(), [": Prologue"]);
    }

    #[tokio::test]
    async fn stops_at_first_success() {
        let candidates = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut tried = Vec::new();

        let found = first_success(&candidates, "none", |c| {
            tried.push(c.clone());
            async move {
                if c == "b" { Attempt::Found(c) } else { Attempt::Rejected }
            }
        })
        .await
        .unwrap();

        assert_eq!(found, "b");
        assert_eq!(tried, ["a", "b"]);
    }

    #[tokio::test]
    async fn reports_last_failure_or_exhaustion() {
        let candidates = vec!["a".to_string(), "b".to_string()];

        let err = first_success::<(), _, _>(&candidates, "nothing matched", |_| async {
            Attempt::Rejected
        })
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "nothing matched");

        let err = first_success::<(), _, _>(&candidates, "nothing matched", |c| async move {
            if c == "a" {
                Attempt::Failed(ProviderError::Fetch(FetchError::Status(500)))
            } else {
                Attempt::Rejected
            }
        })
        .await
        .unwrap_err();
        assert_eq!(err, ProviderError::Fetch(FetchError::Status(500)));
    }

    #[tokio::test]
    async fn no_candidates_is_exhaustion() {
        let err = first_success::<(), _, _>(&[], "empty", |_| async {
            Attempt::Rejected
        })
        .await
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
