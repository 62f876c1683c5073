//! Link header tokenizer and fragment parser

use crate::error::{Error, Result};
use std::collections::HashMap;
use url::Url;

/// One parsed Link header fragment: a URI plus its parameters.
///
/// The pagination role of the link is the `rel` parameter. Unknown
/// parameters are retained. The URI is kept exactly as it appeared in the
/// header; [`Link::url`] parses it on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    uri: String,
    params: HashMap<String, String>,
}

impl Link {
    /// The URI between the angle brackets, byte-for-byte as received
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The URI parsed into a [`Url`]
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse(&self.uri)?)
    }

    /// The `rel` parameter, if present
    pub fn rel(&self) -> Option<&str> {
        self.param("rel")
    }

    /// Whether the `rel` parameter matches `name`, case-insensitively
    pub fn rel_matches(&self, name: &str) -> bool {
        self.rel().is_some_and(|rel| rel.eq_ignore_ascii_case(name))
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All parameters of this fragment
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Parse a sequence of raw `Link` header values into links.
///
/// An empty iterator (absent header) yields an empty list. Any malformed
/// fragment fails the whole parse with [`Error::LinkParse`]. Duplicate
/// relations across fragments are preserved as distinct entries.
pub fn parse_links<I, S>(values: I) -> Result<Vec<Link>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut links = Vec::new();
    for value in values {
        for fragment in split_fragments(value.as_ref()) {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            links.push(parse_fragment(fragment)?);
        }
    }
    Ok(links)
}

/// Split a header value on top-level commas only: a comma between `<` and
/// `>` belongs to the URI and must not split the fragment.
fn split_fragments(value: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut in_brackets = false;
    let mut start = 0;
    for (index, ch) in value.char_indices() {
        match ch {
            '<' => in_brackets = true,
            '>' => in_brackets = false,
            ',' if !in_brackets => {
                fragments.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    fragments.push(&value[start..]);
    fragments
}

/// Parse one `<URI>; param=value; param="value"` fragment.
fn parse_fragment(fragment: &str) -> Result<Link> {
    let rest = fragment.strip_prefix('<').ok_or_else(|| {
        Error::link_parse(format!("missing opening '<' in '{fragment}'"))
    })?;
    let close = rest.find('>').ok_or_else(|| {
        Error::link_parse(format!("missing closing '>' in '{fragment}'"))
    })?;

    let uri = rest[..close].trim().to_string();
    // Validate eagerly so a bad URI fails the parse, not a later fetch
    Url::parse(&uri)
        .map_err(|e| Error::link_parse(format!("invalid URI '{uri}': {e}")))?;

    let mut params = HashMap::new();
    for pair in rest[close + 1..].split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            Error::link_parse(format!("malformed parameter '{pair}' in '{fragment}'"))
        })?;
        let value = value.trim().trim_matches('"');
        params.insert(name.trim().to_string(), value.to_string());
    }

    Ok(Link { uri, params })
}
