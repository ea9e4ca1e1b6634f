// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Extract retriever against a local mock of the Nimble API

use nimble_retriever::{
    ExtractOptions, NimbleConfig, NimbleExtractRetriever, ParsingType, Query, Retriever,
};
use serde_json::json;

use super::mock_server::MockNimble;

fn config(base_url: &str) -> NimbleConfig {
    NimbleConfig::with_api_key("test-key").base_url(base_url)
}

fn page(url: &str, content: &str) -> serde_json::Value {
    json!({
        "page_content": content,
        "metadata": { "url": url, "title": format!("Page {}", url) }
    })
}

#[tokio::test]
async fn test_extract_single_url() {
    let server = MockNimble::ok(json!({ "body": [page("https://a.example", "A text")] })).await;
    let retriever =
        NimbleExtractRetriever::new(config(&server.base_url), ExtractOptions::default()).unwrap();

    let docs = retriever.retrieve(&Query::url("https://a.example")).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].page_content, "A text");
    assert_eq!(docs[0].url(), "https://a.example");

    let request = server.single_request();
    assert_eq!(request.path, "/extract");
    assert_eq!(
        request.body,
        json!({
            "links": ["https://a.example"],
            "driver": "vx6",
            "locale": "en",
            "country": "US",
            "parsing_type": "plain_text"
        })
    );
}

#[tokio::test]
async fn test_extract_multiple_urls_in_one_request() {
    let server = MockNimble::ok(json!({
        "body": [page("https://a.example", "A"), page("https://b.example", "B")]
    }))
    .await;
    let mut options = ExtractOptions::default();
    options.wait = Some(2000);
    options.base.parsing_type = ParsingType::SimplifiedHtml;
    let retriever = NimbleExtractRetriever::new(config(&server.base_url), options).unwrap();

    let docs = retriever
        .retrieve(&Query::urls(["https://a.example", "https://b.example"]))
        .await
        .unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].page_content, "A");
    assert_eq!(docs[1].page_content, "B");

    let body = server.single_request().body;
    assert_eq!(body["links"], json!(["https://a.example", "https://b.example"]));
    assert_eq!(body["wait"], json!(2000));
    assert_eq!(body["parsing_type"], json!("simplified_html"));
}

#[tokio::test]
async fn test_extract_omits_failed_urls() {
    let server = MockNimble::ok(json!({
        "body": [
            page("https://ok.example", "resolved"),
            {
                "page_content": null,
                "metadata": { "url": "https://broken.example" },
                "error": "upstream returned 500"
            }
        ]
    }))
    .await;
    let retriever =
        NimbleExtractRetriever::new(config(&server.base_url), ExtractOptions::default()).unwrap();

    let docs = retriever
        .retrieve(&Query::urls(["https://ok.example", "https://broken.example"]))
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].url(), "https://ok.example");
}

#[tokio::test]
async fn test_extract_service_dropping_url_is_not_an_error() {
    let server = MockNimble::ok(json!({ "body": [page("https://ok.example", "resolved")] })).await;
    let retriever =
        NimbleExtractRetriever::new(config(&server.base_url), ExtractOptions::default()).unwrap();

    let docs = retriever
        .retrieve(&Query::urls(["https://ok.example", "https://gone.example"]))
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
}

#[tokio::test]
async fn test_configured_links_replace_text_query() {
    let server = MockNimble::ok(json!({ "body": [page("https://c.example", "C")] })).await;
    let options = ExtractOptions::default().with_links(["https://c.example"]);
    let retriever = NimbleExtractRetriever::new(config(&server.base_url), options).unwrap();

    let docs = retriever.retrieve(&Query::text("ignored query")).await.unwrap();
    assert_eq!(docs.len(), 1);

    let body = server.single_request().body;
    assert_eq!(body["links"], json!(["https://c.example"]));
}

#[tokio::test]
async fn test_malformed_url_is_left_to_the_service() {
    let server = MockNimble::ok(json!({ "body": [] })).await;
    let retriever =
        NimbleExtractRetriever::new(config(&server.base_url), ExtractOptions::default()).unwrap();

    let docs = retriever.retrieve(&Query::url("not really a url")).await.unwrap();
    assert!(docs.is_empty());
    assert_eq!(server.single_request().body["links"], json!(["not really a url"]));
}
