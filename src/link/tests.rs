//! Tests for Link header parsing

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;
use test_case::test_case;

const GITHUB_HEADER: &str = "<https://api.github.com/repositories/31533997/contributors?per_page=10&page=2>; rel=\"next\", <https://api.github.com/repositories/31533997/contributors?per_page=10&page=10>; rel=\"last\"";

#[test]
fn test_parse_single_fragment() {
    let links = parse_links(["<https://api.example.com/items?page=2>; rel=\"next\""]).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].uri(), "https://api.example.com/items?page=2");
    assert_eq!(links[0].rel(), Some("next"));
}

#[test]
fn test_parse_github_header() {
    let links = parse_links([GITHUB_HEADER]).unwrap();
    assert_eq!(links.len(), 2);

    let next: Vec<_> = links.iter().filter(|l| l.rel_matches("next")).collect();
    assert_eq!(next.len(), 1);
    assert_eq!(
        next[0].uri(),
        "https://api.github.com/repositories/31533997/contributors?per_page=10&page=2"
    );

    let last: Vec<_> = links.iter().filter(|l| l.rel_matches("last")).collect();
    assert_eq!(last.len(), 1);
    assert_eq!(
        last[0].uri(),
        "https://api.github.com/repositories/31533997/contributors?per_page=10&page=10"
    );
}

#[test]
fn test_comma_inside_uri_does_not_split() {
    let links = parse_links(["<https://host/search?tags=a,b,c>; rel=\"next\""]).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].uri(), "https://host/search?tags=a,b,c");
}

#[test]
fn test_unquoted_and_quoted_values() {
    let links =
        parse_links(["<https://host/a>; rel=next, <https://host/b>; rel=\"prev\""]).unwrap();
    assert_eq!(links[0].rel(), Some("next"));
    assert_eq!(links[1].rel(), Some("prev"));
}

#[test]
fn test_unknown_params_retained() {
    let links =
        parse_links(["<https://host/a>; rel=\"next\"; title=\"page two\"; anchor=#top"]).unwrap();
    assert_eq!(links[0].param("title"), Some("page two"));
    assert_eq!(links[0].param("anchor"), Some("#top"));
    assert_eq!(links[0].params().len(), 3);
}

#[test]
fn test_rel_lookup_case_insensitive() {
    let links = parse_links(["<https://host/a>; rel=\"NEXT\""]).unwrap();
    assert!(links[0].rel_matches("next"));
    assert!(links[0].rel_matches("Next"));
    assert!(!links[0].rel_matches("last"));
}

#[test]
fn test_duplicate_relations_preserved() {
    let links =
        parse_links(["<https://host/a>; rel=\"next\", <https://host/b>; rel=\"next\""]).unwrap();
    assert_eq!(links.len(), 2);
    let next: Vec<_> = links.iter().filter(|l| l.rel_matches("next")).collect();
    assert_eq!(next.len(), 2);
    assert_eq!(next[0].uri(), "https://host/a");
    assert_eq!(next[1].uri(), "https://host/b");
}

#[test]
fn test_multiple_header_values() {
    let links = parse_links([
        "<https://host/a>; rel=\"next\"",
        "<https://host/b>; rel=\"last\"",
    ])
    .unwrap();
    assert_eq!(links.len(), 2);
}

#[test]
fn test_empty_input_yields_empty_set() {
    let links = parse_links(Vec::<String>::new()).unwrap();
    assert!(links.is_empty());
}

#[test]
fn test_fragment_url_round_trips() {
    let links = parse_links(["<https://host/items?per_page=10&page=2>; rel=\"next\""]).unwrap();
    let url = links[0].url().unwrap();
    assert_eq!(url.as_str(), "https://host/items?per_page=10&page=2");
}

#[test_case("https://host/a>; rel=\"next\""; "missing opening bracket")]
#[test_case("<https://host/a; rel=\"next\""; "missing closing bracket")]
#[test_case("<https://host/a>; rel"; "parameter without value")]
#[test_case("<not a uri>; rel=\"next\""; "invalid uri")]
fn test_malformed_fragment_fails(header: &str) {
    let err = parse_links([header]).unwrap_err();
    assert!(matches!(err, Error::LinkParse { .. }), "got: {err}");
}
