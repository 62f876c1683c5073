//! # octoflow
//!
//! Streaming GitHub API client: fetches a paginated collection advertised
//! through the `Link` response header, enriches every summary item with a
//! per-item detail fetch, and keeps all outbound traffic under one global
//! rate limit with bounded retry on transient network failure.
//!
//! ## Pagination strategies
//!
//! The engine offers four ways to walk a collection, differing in request
//! concurrency and ordering guarantees:
//!
//! | Strategy        | Requests            | Ordering        |
//! |-----------------|---------------------|-----------------|
//! | `Sequential`    | one at a time       | page order      |
//! | `EagerMerge`    | concurrent          | none            |
//! | `OrderedConcat` | overlapping         | page order      |
//! | `LazyExpand`    | one at a time       | page order      |
//!
//! `EagerMerge` and `OrderedConcat` derive every page URL from the first
//! response's "last" link; `Sequential` and `LazyExpand` follow "next"
//! links and work on collections of unknown length.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use octoflow::{ClientConfig, GithubClient, Strategy};
//!
//! #[tokio::main]
//! async fn main() -> octoflow::Result<()> {
//!     let config = ClientConfig::builder()
//!         .owner("rust-lang")
//!         .repo("rust")
//!         .access_token(std::env::var("GITHUB_TOKEN").unwrap_or_default())
//!         .requests_per_second(5)
//!         .build();
//!
//!     let client = GithubClient::new(config)?;
//!     let mut details = client.contributor_details(Strategy::OrderedConcat);
//!     while let Some(detail) = details.try_next().await? {
//!         println!("{} ({:?})", detail.login, detail.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(missing_docs)] // TODO: document the DTO fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Client configuration
pub mod config;

/// Wire-format data transfer objects
pub mod models;

/// Link header parsing
pub mod link;

/// HTTP requester and rate limiting
pub mod http;

/// Fetched page wrapper
pub mod page;

/// Pagination engine and strategies
pub mod pagination;

/// Per-item detail enrichment
pub mod enrich;

/// High-level client facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::GithubClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{ItemStream, Strategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
