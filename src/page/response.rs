//! Page response type and derived views

use crate::error::{Error, Result};
use crate::link::Link;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Matches the page-number query component, as a leading `?` or joined by `&`
static PAGE_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]page=(\d+)").expect("page pattern is valid"));

/// One fetched page: decoded items plus parsed links.
///
/// Owned by the fetch that produced it and immutable after construction.
/// All derived views work on already-received data; nothing here re-issues
/// a request.
#[derive(Debug)]
pub struct PageResponse<T> {
    items: Vec<T>,
    links: Vec<Link>,
}

impl<T> PageResponse<T> {
    /// Wrap a decoded body and its parsed links
    pub fn new(items: Vec<T>, links: Vec<Link>) -> Self {
        Self { items, links }
    }

    /// The decoded items of this page
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// All links carried by this page
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links whose relation matches `rel`, case-insensitively
    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.rel_matches(rel))
    }

    /// The first link with relation "next", if any
    pub fn next_link(&self) -> Option<&Link> {
        self.links_with_rel("next").next()
    }

    /// The first link with relation "last", if any
    pub fn last_link(&self) -> Option<&Link> {
        self.links_with_rel("last").next()
    }

    /// Derive the URLs of all pages from the "last" link by substituting its
    /// page-number query value with `1..=min(last_page, page_limit)`.
    ///
    /// Fails with [`Error::Pagination`] when the page carries no "last" link
    /// or its URI has no recognizable page marker.
    pub fn all_page_urls(&self, page_limit: u32) -> Result<Vec<Url>> {
        let last = self
            .last_link()
            .ok_or_else(|| Error::pagination("response carries no \"last\" link"))?;
        let raw = last.uri();

        let captures = PAGE_PARAM.captures(raw).ok_or_else(|| {
            Error::pagination(format!("no recognizable last-page marker in '{raw}'"))
        })?;
        let digits = captures.get(1).map_or(0..0, |m| m.range());
        let last_page: u32 = raw[digits.clone()].parse().map_err(|_| {
            Error::pagination(format!("last-page number out of range in '{raw}'"))
        })?;

        let count = last_page.min(page_limit);
        let mut urls = Vec::with_capacity(count as usize);
        for page in 1..=count {
            let mut templated = String::with_capacity(raw.len() + 2);
            templated.push_str(&raw[..digits.start]);
            templated.push_str(&page.to_string());
            templated.push_str(&raw[digits.end..]);
            urls.push(Url::parse(&templated)?);
        }
        Ok(urls)
    }
}
