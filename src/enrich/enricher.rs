//! Detail enricher implementation

use crate::error::Result;
use crate::http::RetryingRequester;
use crate::pagination::{ItemStream, Strategy};
use futures::stream::{StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Maps summary items to per-item detail fetches
pub struct DetailEnricher {
    requester: Arc<RetryingRequester>,
    concurrency: usize,
}

impl DetailEnricher {
    /// Create an enricher fetching through `requester`, with at most
    /// `concurrency` detail requests in flight.
    pub fn new(requester: Arc<RetryingRequester>, concurrency: usize) -> Self {
        Self {
            requester,
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch one detail record per summary item.
    ///
    /// `to_url` derives the detail location from the summary. An unordered
    /// strategy merges details as they arrive; every other strategy emits
    /// them in summary order, with requests still overlapping up to the
    /// concurrency bound.
    pub fn enrich<S, D, F>(
        &self,
        summaries: ItemStream<S>,
        strategy: Strategy,
        to_url: F,
    ) -> ItemStream<D>
    where
        S: Send + 'static,
        D: DeserializeOwned + Send + 'static,
        F: Fn(&S) -> Result<Url> + Send + Sync + 'static,
    {
        let requester = Arc::clone(&self.requester);
        let fetches = summaries.map_ok(move |summary| {
            let requester = Arc::clone(&requester);
            let url = to_url(&summary);
            async move { requester.get_json::<D>(url?).await }
        });

        if strategy.preserves_order() {
            fetches.try_buffered(self.concurrency).boxed()
        } else {
            fetches.try_buffer_unordered(self.concurrency).boxed()
        }
    }
}

impl std::fmt::Debug for DetailEnricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailEnricher")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
