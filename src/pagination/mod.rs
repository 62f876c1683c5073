//! Pagination engine
//!
//! Drives the retrieval of every page of a Link-header collection under one
//! of four strategies:
//!
//! - [`Strategy::Sequential`] — follow "next" links one request at a time,
//!   bounded by the page ceiling; page order preserved
//! - [`Strategy::EagerMerge`] — derive all page URLs from the "last" link
//!   and fetch them concurrently, merging pages as they arrive; no
//!   cross-page ordering guarantee
//! - [`Strategy::OrderedConcat`] — same derivation, requests may overlap,
//!   but pages are emitted in order
//! - [`Strategy::LazyExpand`] — follow "next" links without a ceiling;
//!   needs no "last" link, so it handles unknown-length collections
//!
//! All strategies produce a lazy, one-pass stream: dropping it (or taking
//! only a prefix) stops further requests.

mod strategies;
mod types;

pub use strategies::PaginationEngine;
pub use types::{ItemStream, Strategy};
