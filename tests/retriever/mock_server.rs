// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local stand-in for the Nimble API
//!
//! Serves `/search` and `/extract` with a canned status and body, and records
//! every request it receives.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub client_source: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

pub struct MockNimble {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockNimble {
    /// Start a server on an ephemeral port; must run inside a tokio runtime
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/search", post(handle))
            .route("/extract", post(handle))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Start a server answering 200 with `body`
    pub async fn ok(body: Value) -> Self {
        Self::start(StatusCode::OK, body.to_string()).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn single_request(&self) -> CapturedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        authorization: header_value("authorization"),
        client_source: header_value("x-client-source"),
        content_type: header_value("content-type"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
        .into_response()
}

/// Response body with `n` search hits numbered from 1
pub fn search_body(n: usize) -> Value {
    let items: Vec<Value> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "page_content": format!("Content {}", i),
                "metadata": {
                    "title": format!("Title {}", i),
                    "url": format!("https://example.com/{}", i),
                    "snippet": format!("Snippet {}", i),
                    "position": i,
                    "entity_type": "OrganicResult"
                }
            })
        })
        .collect();
    serde_json::json!({ "body": items })
}
