//! Pagination types

use crate::error::Result;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// A lazy, one-pass stream of decoded items.
///
/// Non-restartable: once consumed it cannot be replayed. The stream fails
/// terminally on the first error; items emitted before the failure remain
/// valid.
pub type ItemStream<T> = BoxStream<'static, Result<T>>;

/// Page retrieval strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Follow "next" links one request at a time, bounded by the ceiling
    #[default]
    Sequential,
    /// Fetch all derived pages concurrently, unordered across pages
    EagerMerge,
    /// Fetch derived pages with overlap, emit in page order
    OrderedConcat,
    /// Follow "next" links without a ceiling or a "last" link
    LazyExpand,
}

impl Strategy {
    /// Every strategy, in declaration order
    pub fn all() -> [Strategy; 4] {
        [
            Strategy::Sequential,
            Strategy::EagerMerge,
            Strategy::OrderedConcat,
            Strategy::LazyExpand,
        ]
    }

    /// Whether this strategy emits items in page order
    pub fn preserves_order(self) -> bool {
        !matches!(self, Strategy::EagerMerge)
    }

    /// Whether this strategy derives page URLs from the "last" link and
    /// therefore fails on collections that do not advertise one
    pub fn requires_last_link(self) -> bool {
        matches!(self, Strategy::EagerMerge | Strategy::OrderedConcat)
    }
}
