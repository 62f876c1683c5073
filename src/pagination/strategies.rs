//! Strategy implementations
//!
//! Each strategy is a pure data flow built from stream combinators, not a
//! long-lived state machine. The merge-vs-concat distinction is the whole
//! point: `EagerMerge` trades ordering for wall-clock speed, `OrderedConcat`
//! keeps page order while still overlapping requests.

use super::types::{ItemStream, Strategy};
use crate::error::{Error, Result};
use crate::http::RetryingRequester;
use crate::page::PageResponse;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Drives page retrieval through the shared requester
pub struct PaginationEngine {
    requester: Arc<RetryingRequester>,
    concurrency: usize,
}

impl PaginationEngine {
    /// Create an engine fetching through `requester`, with `concurrency`
    /// bounding the in-flight requests of the parallel strategies.
    pub fn new(requester: Arc<RetryingRequester>, concurrency: usize) -> Self {
        Self {
            requester,
            concurrency: concurrency.max(1),
        }
    }

    /// All items of the collection starting at `first_page`, retrieved
    /// under `strategy` with at most `page_limit` additional pages.
    pub fn items<T>(&self, strategy: Strategy, first_page: Url, page_limit: u32) -> ItemStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match strategy {
            Strategy::Sequential => self.follow_next(first_page, Some(page_limit)),
            Strategy::LazyExpand => self.follow_next(first_page, None),
            Strategy::EagerMerge => self.eager_merge(first_page, page_limit),
            Strategy::OrderedConcat => self.ordered_concat(first_page, page_limit),
        }
    }

    /// Sequential-follow and lazy-expand: fetch a page, emit its items,
    /// continue with its "next" link. `budget` counts the additional pages
    /// still allowed; `None` means unbounded.
    fn follow_next<T>(&self, first_page: Url, budget: Option<u32>) -> ItemStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let requester = Arc::clone(&self.requester);
        stream::try_unfold(Some((first_page, budget)), move |state| {
            let requester = Arc::clone(&requester);
            async move {
                let Some((url, budget)) = state else {
                    return Ok::<_, Error>(None);
                };
                let page = requester.get_page::<T>(url).await?;
                let next = if budget == Some(0) {
                    None
                } else {
                    page.next_link().map(|link| link.url()).transpose()?
                };
                let next_state = next.map(|url| (url, budget.map(|b| b.saturating_sub(1))));
                Ok(Some((page.into_items(), next_state)))
            }
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
        .try_flatten()
        .boxed()
    }

    /// Eager-parallel-merge: discover the page range from the first
    /// response, fetch the rest concurrently, emit pages as they arrive.
    fn eager_merge<T>(&self, first_page: Url, page_limit: u32) -> ItemStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let requester = Arc::clone(&self.requester);
        let concurrency = self.concurrency;
        stream::once(async move {
            let page = requester.get_page::<T>(first_page).await?;
            let rest = remaining_page_urls(&page, page_limit)?;

            let tail = stream::iter(rest)
                .map(move |url| {
                    let requester = Arc::clone(&requester);
                    async move { requester.get_json::<Vec<T>>(url).await }
                })
                .buffer_unordered(concurrency)
                .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
                .try_flatten()
                .boxed();
            let head = stream::iter(page.into_items().into_iter().map(Ok)).boxed();

            Ok::<_, Error>(stream::select(head, tail))
        })
        .try_flatten()
        .boxed()
    }

    /// Ordered-parallel-concat: same page derivation, requests overlap up
    /// to the concurrency bound, items come out in page order.
    fn ordered_concat<T>(&self, first_page: Url, page_limit: u32) -> ItemStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let requester = Arc::clone(&self.requester);
        let concurrency = self.concurrency;
        stream::once(async move {
            let page = requester.get_page::<T>(first_page).await?;
            let rest = remaining_page_urls(&page, page_limit)?;

            let tail = stream::iter(rest)
                .map(move |url| {
                    let requester = Arc::clone(&requester);
                    async move { requester.get_json::<Vec<T>>(url).await }
                })
                .buffered(concurrency)
                .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
                .try_flatten();
            let head = stream::iter(page.into_items().into_iter().map(Ok));

            Ok::<_, Error>(head.chain(tail))
        })
        .try_flatten()
        .boxed()
    }
}

/// Page URLs still to fetch after the discovery response: the full range
/// derived from the "last" link minus page 1, whose items the discovery
/// response already delivered.
fn remaining_page_urls<T>(page: &PageResponse<T>, page_limit: u32) -> Result<Vec<Url>> {
    let mut urls = page.all_page_urls(page_limit)?;
    if !urls.is_empty() {
        urls.remove(0);
    }
    Ok(urls)
}

impl std::fmt::Debug for PaginationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
