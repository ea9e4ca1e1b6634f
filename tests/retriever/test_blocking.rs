// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Blocking call form; these run outside any tokio runtime on purpose

use axum::http::StatusCode;
use nimble_retriever::{
    ExtractOptions, NimbleConfig, NimbleExtractRetriever, NimbleSearchRetriever, Query, Retriever,
    RetrieverError, SearchOptions,
};
use serde_json::json;
use tokio::runtime::Runtime;

use super::mock_server::{search_body, MockNimble};

fn config(base_url: &str) -> NimbleConfig {
    NimbleConfig::with_api_key("test-key").base_url(base_url)
}

#[test]
fn test_blocking_and_async_return_identical_documents() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockNimble::ok(search_body(4)));

    let async_retriever =
        NimbleSearchRetriever::new(config(&server.base_url), SearchOptions::default().with_k(4))
            .unwrap();
    let async_docs = rt
        .block_on(async_retriever.retrieve(&Query::text("rust")))
        .unwrap();

    let blocking = NimbleSearchRetriever::new(
        config(&server.base_url),
        SearchOptions::default().with_k(4),
    )
    .unwrap()
    .into_blocking()
    .unwrap();
    let blocking_docs = blocking.retrieve(&Query::text("rust")).unwrap();

    assert_eq!(async_docs.len(), 4);
    assert_eq!(async_docs, blocking_docs);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);
}

#[test]
fn test_blocking_extract() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockNimble::ok(json!({
        "body": [{ "page_content": "A", "metadata": { "url": "https://a.example" } }]
    })));

    let blocking = NimbleExtractRetriever::new(config(&server.base_url), ExtractOptions::default())
        .unwrap()
        .into_blocking()
        .unwrap();
    assert_eq!(blocking.name(), "nimble_extract");

    let docs = blocking.retrieve(&Query::url("https://a.example")).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].url(), "https://a.example");
}

#[test]
fn test_blocking_surfaces_same_errors() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockNimble::start(StatusCode::UNAUTHORIZED, "{}"));

    let blocking = NimbleSearchRetriever::new(config(&server.base_url), SearchOptions::default())
        .unwrap()
        .into_blocking()
        .unwrap();
    let result = blocking.retrieve(&Query::text("rust"));
    assert!(matches!(result, Err(RetrieverError::Authentication(_))));
}
