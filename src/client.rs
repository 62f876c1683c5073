//! High-level client facade
//!
//! Wires configuration, requester, pagination engine and enricher together
//! and exposes typed streams over the collection endpoints.

use crate::config::ClientConfig;
use crate::enrich::DetailEnricher;
use crate::error::{Error, Result};
use crate::http::RetryingRequester;
use crate::models::{Comment, PullRequest, User, UserDetail};
use crate::pagination::{ItemStream, PaginationEngine, Strategy};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// Page size used by the single-page contributors accessor
const SINGLE_PAGE_SIZE: u32 = 100;

/// Client for the paginated collection endpoints of one repository
pub struct GithubClient {
    config: ClientConfig,
    base_url: Url,
    requester: Arc<RetryingRequester>,
    engine: PaginationEngine,
    enricher: DetailEnricher,
}

impl GithubClient {
    /// Create a client from an immutable configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.owner.is_empty() || config.repo.is_empty() {
            return Err(Error::config("owner and repo must be set"));
        }
        let base_url = Url::parse(&config.base_url)?;
        let requester = Arc::new(RetryingRequester::new(&config)?);
        let engine = PaginationEngine::new(Arc::clone(&requester), config.max_concurrency);
        let enricher = DetailEnricher::new(Arc::clone(&requester), config.max_concurrency);

        Ok(Self {
            config,
            base_url,
            requester,
            engine,
            enricher,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Number of outbound request attempts issued so far
    pub fn request_count(&self) -> u64 {
        self.requester.request_count()
    }

    // ============================================================================
    // Contributors
    // ============================================================================

    /// All contributors of the repository, paged under `strategy` and
    /// enriched with one detail fetch per user.
    ///
    /// The enrichment discipline matches the strategy: an unordered paging
    /// strategy merges details as they arrive, every other strategy keeps
    /// contributor order end to end.
    pub fn contributor_details(&self, strategy: Strategy) -> ItemStream<UserDetail> {
        let summaries = self.paged::<User>("contributors", strategy);
        let base = self.base_url.clone();
        let details = self.enricher.enrich(summaries, strategy, move |user: &User| {
            Ok(base.join(&format!("users/{}", user.login))?)
        });

        // log the total once the stream is drained
        let requester = Arc::clone(&self.requester);
        details
            .chain(
                stream::once(async move {
                    info!("total request count: {}", requester.request_count());
                    None
                })
                .filter_map(|done: Option<Result<UserDetail>>| async move { done }),
            )
            .boxed()
    }

    /// One page of contributors, `per_page=100`, no pagination
    pub fn contributors(&self) -> ItemStream<User> {
        let url = self
            .collection_url("contributors")
            .map(|mut url| {
                url.query_pairs_mut()
                    .append_pair("per_page", &SINGLE_PAGE_SIZE.to_string());
                url
            });
        let requester = Arc::clone(&self.requester);
        stream::once(async move { requester.get_json::<Vec<User>>(url?).await })
            .map_ok(|users| stream::iter(users.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    /// Detail record for a single user
    pub async fn user_detail(&self, login: &str) -> Result<UserDetail> {
        let url = self.base_url.join(&format!("users/{login}"))?;
        self.requester.get_json(url).await
    }

    // ============================================================================
    // Pull requests and comments
    // ============================================================================

    /// Pull requests of the repository, paged under `strategy`
    pub fn pull_requests(&self, strategy: Strategy) -> ItemStream<PullRequest> {
        self.paged("pulls", strategy)
    }

    /// Comments on one issue, paged under `strategy`
    pub fn issue_comments(&self, number: u64, strategy: Strategy) -> ItemStream<Comment> {
        self.paged(&format!("issues/{number}/comments"), strategy)
    }

    /// Review comments on one pull request, paged under `strategy`
    pub fn pull_request_comments(&self, number: u64, strategy: Strategy) -> ItemStream<Comment> {
        self.paged(&format!("pulls/{number}/comments"), strategy)
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Paged stream over one collection endpoint of the repository
    fn paged<T>(&self, tail: &str, strategy: Strategy) -> ItemStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.first_page_url(tail) {
            Ok(url) => self.engine.items(strategy, url, self.config.page_limit),
            Err(e) => err_stream(e),
        }
    }

    /// First-page URL of a collection: the endpoint plus `per_page`
    fn first_page_url(&self, tail: &str) -> Result<Url> {
        let mut url = self.collection_url(tail)?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.config.page_size.to_string());
        Ok(url)
    }

    fn collection_url(&self, tail: &str) -> Result<Url> {
        let path = format!(
            "repos/{}/{}/{}",
            self.config.owner, self.config.repo, tail
        );
        Ok(self.base_url.join(&path)?)
    }
}

/// A stream that fails immediately with `error`
fn err_stream<T: Send + 'static>(error: Error) -> ItemStream<T> {
    stream::once(async move { Err(error) }).boxed()
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("base_url", &self.base_url.as_str())
            .field("owner", &self.config.owner)
            .field("repo", &self.config.repo)
            .finish_non_exhaustive()
    }
}
