//! HTTP layer
//!
//! Provides the retrying GET requester and the request rate limiter.
//!
//! # Features
//!
//! - **Bounded Retry**: transient network failures retried with exponential
//!   backoff; API-level rejections surfaced immediately
//! - **Rate Limiting**: global permit clock shared by every outbound
//!   request, isolated on a dedicated issuing task
//! - **Observability**: per-attempt tracing and a shared request counter

mod rate_limit;
mod requester;

pub use rate_limit::RateLimiter;
pub use requester::{RetryingRequester, ACCEPT_GITHUB_V3, USER_AGENT};
