//! Tests for detail enrichment

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::RetryingRequester;
use crate::pagination::Strategy;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Detail {
    id: u32,
    score: u32,
}

fn enricher() -> DetailEnricher {
    let config = ClientConfig::builder()
        .timeout(Duration::from_secs(2))
        .initial_backoff(Duration::from_millis(10))
        .build();
    DetailEnricher::new(Arc::new(RetryingRequester::new(&config).unwrap()), 4)
}

fn summaries<I>(ids: I) -> crate::pagination::ItemStream<u32>
where
    I: IntoIterator<Item = u32>,
    I::IntoIter: Send + 'static,
{
    stream::iter(ids.into_iter().map(Ok)).boxed()
}

async fn mount_details(server: &MockServer, ids: impl IntoIterator<Item = u32>) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/details/{id}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": id, "score": id * 10})),
            )
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_ordered_enrichment_preserves_summary_order() {
    let server = MockServer::start().await;
    mount_details(&server, 0..8).await;

    let uri = server.uri();
    let details: Vec<Detail> = enricher()
        .enrich(summaries(0..8), Strategy::Sequential, move |id: &u32| {
            Ok(Url::parse(&format!("{uri}/details/{id}"))?)
        })
        .try_collect()
        .await
        .unwrap();

    let ids: Vec<u32> = details.iter().map(|d| d.id).collect();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
    assert_eq!(details[3].score, 30);
}

#[tokio::test]
async fn test_unordered_enrichment_keeps_the_set() {
    let server = MockServer::start().await;
    mount_details(&server, 0..8).await;

    let uri = server.uri();
    let details: Vec<Detail> = enricher()
        .enrich(summaries(0..8), Strategy::EagerMerge, move |id: &u32| {
            Ok(Url::parse(&format!("{uri}/details/{id}"))?)
        })
        .try_collect()
        .await
        .unwrap();

    let mut ids: Vec<u32> = details.iter().map(|d| d.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..8).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_detail_failure_terminates_the_stream() {
    let server = MockServer::start().await;
    mount_details(&server, [1]).await;
    Mock::given(method("GET"))
        .and(path("/details/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "gone"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = enricher()
        .enrich(summaries([1, 2]), Strategy::Sequential, move |id: &u32| {
            Ok(Url::parse(&format!("{uri}/details/{id}"))?)
        })
        .try_collect::<Vec<Detail>>()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 404, .. }), "got: {err}");
}

#[tokio::test]
async fn test_summary_failure_passes_through() {
    let failing: crate::pagination::ItemStream<u32> = stream::iter(vec![
        Ok(1),
        Err(Error::pagination("no last link")),
    ])
    .boxed();

    let server = MockServer::start().await;
    mount_details(&server, [1]).await;

    let uri = server.uri();
    let results: Vec<Result<Detail, Error>> = enricher()
        .enrich(failing, Strategy::Sequential, move |id: &u32| {
            Ok(Url::parse(&format!("{uri}/details/{id}"))?)
        })
        .collect()
        .await;

    // the upstream failure surfaces exactly once, alongside the detail
    // fetched for the item emitted before it
    assert_eq!(results.len(), 2);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(Error::Pagination { .. }))));
}
