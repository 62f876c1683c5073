//! Client configuration
//!
//! `ClientConfig` is assembled once, handed to [`crate::GithubClient::new`],
//! and never mutated afterwards.

use std::time::Duration;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default number of items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default ceiling on additional pages fetched per pagination run
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Default bound on concurrently in-flight page/detail requests
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Configuration for the client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Access token sent as `Authorization: token <...>`; empty disables auth
    pub access_token: String,
    /// Outbound request rate limit; 0 disables rate limiting
    pub requests_per_second: u32,
    /// Items per page (`per_page` query parameter)
    pub page_size: u32,
    /// Maximum number of additional pages a pagination run may fetch
    pub page_limit: u32,
    /// Bound on concurrently in-flight requests for the parallel strategies
    pub max_concurrency: usize,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for transient failures
    pub max_retries: u32,
    /// Initial delay for exponential backoff
    pub initial_backoff: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            owner: String::new(),
            repo: String::new(),
            access_token: String::new(),
            requests_per_second: 0,
            page_size: DEFAULT_PAGE_SIZE,
            page_limit: DEFAULT_PAGE_LIMIT,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Create a config for a repository with all defaults
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the repository owner
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.config.owner = owner.into();
        self
    }

    /// Set the repository name
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.config.repo = repo.into();
        self
    }

    /// Set the access token
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = token.into();
        self
    }

    /// Set the outbound request rate; 0 disables rate limiting
    pub fn requests_per_second(mut self, rate: u32) -> Self {
        self.config.requests_per_second = rate;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the page ceiling
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.config.page_limit = limit;
        self
    }

    /// Set the concurrency bound for the parallel strategies
    pub fn max_concurrency(mut self, concurrency: usize) -> Self {
        self.config.max_concurrency = concurrency;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the initial backoff delay
    pub fn initial_backoff(mut self, backoff: Duration) -> Self {
        self.config.initial_backoff = backoff;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("rust-lang", "rust", "t0ken");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.owner, "rust-lang");
        assert_eq!(config.repo, "rust");
        assert_eq!(config.access_token, "t0ken");
        assert_eq!(config.requests_per_second, 0);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080")
            .owner("octo")
            .repo("flow")
            .access_token("secret")
            .requests_per_second(2)
            .page_size(25)
            .page_limit(10)
            .max_concurrency(4)
            .timeout(Duration::from_secs(5))
            .max_retries(1)
            .initial_backoff(Duration::from_millis(100))
            .build();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "flow");
        assert_eq!(config.access_token, "secret");
        assert_eq!(config.requests_per_second, 2);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.page_limit, 10);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.initial_backoff, Duration::from_millis(100));
    }
}
