//! Watchlist aggregation: listing → detail → enrichment → reconciliation.

pub mod candidates;
pub mod enrichment;
pub mod listing;
pub mod reconcile;

use std::{fmt, time::Duration};

use futures::{StreamExt, stream};
use tracing::{debug, info, warn};

use crate::{
    domain::{
        AggregatedItem, OutputRecord, ResolvedTitle, ServiceResult, StubRecord,
        guarded, service,
    },
    infra::{http::FetchOutcome, providers::LetterboxdClient},
};

pub use candidates::{Attempt, TitleCandidates, first_success};
pub use enrichment::{Enricher, Enrichment};
pub use listing::{ListingError, ListingExtractor, ListingSelectors};
pub use reconcile::{clean_title, reconcile};

/// Concurrency limits for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Items processed at the same time.
    pub max_concurrency: usize,
    /// Upper bound for every single upstream call.
    pub call_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            call_timeout: Duration::from_secs(15),
        }
    }
}

/// Turns a listing path into reconciled output records.
#[derive(Clone)]
pub struct Pipeline {
    letterboxd: LetterboxdClient,
    extractor: ListingExtractor,
    enricher: Enricher,
    settings: PipelineSettings,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("letterboxd", &self.letterboxd)
            .field("enricher", &self.enricher)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assembles a pipeline from its stages.
    pub fn new(
        letterboxd: LetterboxdClient,
        extractor: ListingExtractor,
        enricher: Enricher,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            letterboxd,
            extractor,
            enricher,
            settings,
        }
    }

    /// Limits this pipeline runs with.
    pub fn settings(&self) -> PipelineSettings {
        self.settings
    }

    /// Scrapes `listing_path` and returns one output record per listed film,
    /// in listing order. A listing that cannot be fetched yields no records.
    pub async fn run(&self, listing_path: &str) -> Vec<OutputRecord> {
        self.run_detailed(listing_path)
            .await
            .into_iter()
            .map(|item| item.output)
            .collect()
    }

    /// Like [`Pipeline::run`] but keeps every intermediate result.
    pub async fn run_detailed(&self, listing_path: &str) -> Vec<AggregatedItem> {
        let url = match self.letterboxd.listing_url(listing_path) {
            Ok(url) => url,
            Err(err) => {
                warn!(path = %listing_path, error = %err, "invalid listing path");
                return Vec::new();
            }
        };

        let markup = match self.letterboxd.fetch_listing(&url).await {
            FetchOutcome::Content(markup) => markup,
            FetchOutcome::Failed(_) => return Vec::new(),
        };

        let stubs = self.extractor.extract(&markup);
        info!(url = %url, items = stubs.len(), "listing parsed");

        self.aggregate(stubs).await
    }

    /// Drives every stub through the pipeline with at most
    /// `max_concurrency` items in flight. Output order is input order.
    pub async fn aggregate(&self, stubs: Vec<StubRecord>) -> Vec<AggregatedItem> {
        let total = stubs.len();
        let items: Vec<AggregatedItem> = stream::iter(stubs)
            .map(|stub| self.process(stub))
            .buffered(self.settings.max_concurrency.max(1))
            .collect()
            .await;

        let with_errors =
            items.iter().filter(|item| !item.output.errors.is_empty()).count();
        info!(total, with_errors, "aggregation finished");

        items
    }

    async fn process(&self, stub: StubRecord) -> AggregatedItem {
        let resolved = self.resolve(&stub).await;
        let Enrichment { ratings, catalog } = self.enricher.enrich(&resolved).await;
        let output = reconcile(&resolved, &ratings, &catalog);

        debug!(
            endpoint = %stub.detail_endpoint,
            title = %output.title,
            errors = output.errors.len(),
            "item reconciled"
        );

        AggregatedItem {
            stub,
            resolved,
            ratings,
            catalog,
            output,
        }
    }

    /// Detail stage. Enrichment for the item waits on this.
    pub async fn resolve(&self, stub: &StubRecord) -> ServiceResult<ResolvedTitle> {
        guarded(
            service::LETTERBOXD,
            self.settings.call_timeout,
            self.letterboxd.fetch_detail(&stub.detail_endpoint),
        )
        .await
    }
}
