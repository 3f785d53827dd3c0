//! Listing page extraction.
//!
//! A watchlist page renders one `li.poster-container` per film; the lazy
//! poster element inside it carries the path of the film's production-data
//! JSON. Only that path is kept.

use scraper::{Html, Selector};
use thiserror::Error;

use crate::domain::StubRecord;

/// Listing extraction setup failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// A configured selector does not parse.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector {
        /// The offending selector.
        selector: String,
        /// Parser message.
        reason: String,
    },
}

/// Where to find detail endpoints in listing markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSelectors {
    /// One match per listed film.
    pub item: String,
    /// Element inside an item carrying the endpoint.
    pub endpoint: String,
    /// Attribute holding the detail endpoint.
    pub attribute: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: "li.poster-container".to_string(),
            endpoint: "div.really-lazy-load".to_string(),
            attribute: "data-production-data-endpoint".to_string(),
        }
    }
}

/// Compiled [`ListingSelectors`].
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    item: Selector,
    endpoint: Selector,
    attribute: String,
}

fn compile(selector: &str) -> Result<Selector, ListingError> {
    Selector::parse(selector).map_err(|err| ListingError::InvalidSelector {
        selector: selector.to_string(),
        reason: err.to_string(),
    })
}

impl ListingExtractor {
    /// Compiles `selectors`, failing on the first invalid one.
    pub fn new(selectors: &ListingSelectors) -> Result<Self, ListingError> {
        Ok(Self {
            item: compile(&selectors.item)?,
            endpoint: compile(&selectors.endpoint)?,
            attribute: selectors.attribute.clone(),
        })
    }

    /// One stub per matched item, in document order. Items without the
    /// endpoint element or attribute are kept with an empty endpoint.
    pub fn extract(&self, markup: &str) -> Vec<StubRecord> {
        let document = Html::parse_document(markup);

        document
            .select(&self.item)
            .map(|item| {
                let endpoint = item
                    .select(&self.endpoint)
                    .next()
                    .and_then(|el| el.value().attr(&self.attribute))
                    .unwrap_or_default();
                StubRecord::new(endpoint)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(&ListingSelectors::default()).unwrap()
    }

    const PAGE: &str = r#"
        <html><body>
        <ul class="poster-list">
          <li class="poster-container">
            <div class="really-lazy-load" data-production-data-endpoint="/film/heat/json/"></div>
          </li>
          <li class="poster-container">
            <div class="really-lazy-load"></div>
          </li>
          <li class="poster-container">
            <span>no poster</span>
          </li>
          <li class="poster-container">
            <div class="really-lazy-load" data-production-data-endpoint="/film/ronin/json/"></div>
          </li>
          <li class="other"><div class="really-lazy-load" data-production-data-endpoint="/film/skip/json/"></div></li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn keeps_every_item_in_document_order() {
        let stubs = extractor().extract(PAGE);
        let endpoints: Vec<_> =
            stubs.iter().map(|s| s.detail_endpoint.as_str()).collect();
        assert_eq!(endpoints, ["/film/heat/json/", "", "", "/film/ronin/json/"]);
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        assert!(extractor().extract("<html><p>nothing here</p></html>").is_empty());
        assert!(extractor().extract("").is_empty());
    }

    #[test]
    fn invalid_selector_is_rejected_at_construction() {
        let selectors = ListingSelectors {
            item: "li[".to_string(),
            ..ListingSelectors::default()
        };
        let err = ListingExtractor::new(&selectors).unwrap_err();
        assert!(matches!(err, ListingError::InvalidSelector { .. }));
    }
}
