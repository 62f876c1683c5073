//! Link header parsing
//!
//! Parses the `Link` response header format used for pagination:
//!
//! ```text
//! <https://host/path?per_page=10&page=2>; rel="next", <https://host/path?per_page=10&page=10>; rel="last"
//! ```
//!
//! Each header value is a comma-separated list of fragments; commas inside
//! the angle brackets of a URI never split a fragment.

mod parser;

pub use parser::{parse_links, Link};

#[cfg(test)]
mod tests;
