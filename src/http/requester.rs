//! Retrying GET requester
//!
//! Wraps a single HTTP GET with rate limiting, response classification and
//! bounded retry. Every page and detail request in the crate goes through
//! here, so the rate limit and the request counter are global by
//! construction.

use super::rate_limit::RateLimiter;
use crate::config::ClientConfig;
use crate::error::{is_transient_request_error, Error, Result};
use crate::link::parse_links;
use crate::models::ErrorBody;
use crate::page::PageResponse;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// Media type accepted on every request
pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// Fixed agent string sent on every request
pub const USER_AGENT: &str = "octoflow github connector";

/// GET requester with rate limiting and bounded retry
pub struct RetryingRequester {
    client: Client,
    rate_limiter: Option<RateLimiter>,
    max_retries: u32,
    initial_backoff: Duration,
    request_count: AtomicU64,
}

impl RetryingRequester {
    /// Build a requester from the client configuration.
    ///
    /// Fixed headers (media type, authorization, agent string) are attached
    /// to the underlying client once; a rate limiter is created when the
    /// configured rate is non-zero.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        if !config.access_token.is_empty() {
            let mut value = HeaderValue::from_str(&format!("token {}", config.access_token))
                .map_err(|_| Error::config("access token contains invalid header characters"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let rate_limiter = NonZeroU32::new(config.requests_per_second).map(RateLimiter::new);

        Ok(Self {
            client,
            rate_limiter,
            max_retries: config.max_retries,
            initial_backoff: config.initial_backoff,
            request_count: AtomicU64::new(0),
        })
    }

    /// Fetch one page: decoded items plus the links parsed from its
    /// `Link` header.
    pub async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<PageResponse<T>> {
        let response = self.execute(url).await?;
        let links = parse_links(
            response
                .headers()
                .get_all(LINK)
                .iter()
                .filter_map(|value| value.to_str().ok()),
        )?;
        let items = response.json::<Vec<T>>().await?;
        Ok(PageResponse::new(items, links))
    }

    /// Fetch a URL and decode its body
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.execute(url).await?;
        Ok(response.json().await?)
    }

    /// Number of outbound request attempts issued so far
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Issue one GET, acquiring a permit per attempt and retrying transient
    /// failures up to the budget.
    async fn execute(&self, url: Url) -> Result<Response> {
        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= self.max_retries {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.acquire().await;
            }

            self.request_count.fetch_add(1, Ordering::Relaxed);
            let start = Instant::now();
            debug!("GET started: {url}");

            match self.client.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(
                        "GET finished {}: {url} in {} ms",
                        status,
                        start.elapsed().as_millis()
                    );
                    if status.is_success() {
                        return Ok(response);
                    }
                    // non-2xx is a permanent API rejection, never retried
                    return Err(api_error(status, response).await);
                }
                Err(e) if is_transient_request_error(&e) && attempt < self.max_retries => {
                    let delay = self.backoff(attempt);
                    warn!(
                        "GET {url} failed ({e}), attempt {}/{}, retrying in {delay:?}",
                        attempt + 1,
                        self.max_retries + 1,
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(Error::Http(e));
                    attempt += 1;
                }
                Err(e) => {
                    warn!("GET {url} failed ({e}), giving up");
                    return Err(Error::Http(e));
                }
            }
        }

        // Exhausted all retries
        Err(last_error.unwrap_or(Error::MaxRetriesExceeded {
            max_retries: self.max_retries,
        }))
    }

    /// Exponential backoff delay for a given attempt
    fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff * 2u32.saturating_pow(attempt)
    }
}

/// Decode the error body of a non-2xx response into a permanent error.
async fn api_error(status: StatusCode, response: Response) -> Error {
    let body: ErrorBody = response.json().await.unwrap_or_default();
    if let Some(doc) = &body.documentation_url {
        debug!("error documentation: {doc}");
    }
    Error::api(status.as_u16(), body.message)
}

impl std::fmt::Debug for RetryingRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingRequester")
            .field("max_retries", &self.max_retries)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
