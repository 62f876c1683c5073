//! Per-item detail enrichment
//!
//! Maps every summary item of a paged stream to one additional detail
//! fetch, with a concurrency discipline matching the pagination strategy so
//! the pipeline's ordering contract holds end to end.

mod enricher;

pub use enricher::DetailEnricher;

#[cfg(test)]
mod tests;
