// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP transport for the Nimble API
//!
//! Sends exactly one POST per call and maps the response into [`Document`]s.
//! No retry, no caching.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::config::NimbleConfig;
use super::types::{Document, RetrieverError};
use crate::version;

const CLIENT_SOURCE_HEADER: &str = "x-client-source";

/// Shared HTTP client bound to one base URL and API key
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct NimbleClient {
    client: Client,
    config: NimbleConfig,
}

impl NimbleClient {
    /// Create a client from configuration
    ///
    /// Fails with [`RetrieverError::Authentication`] when no API key is set,
    /// before any request is made.
    pub fn new(config: NimbleConfig) -> Result<Self, RetrieverError> {
        config.validate().map_err(RetrieverError::invalid_params)?;

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                RetrieverError::Authentication(
                    "API key required: set NIMBLE_API_KEY or pass api_key".to_string(),
                )
            })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            RetrieverError::Authentication("API key contains invalid header characters".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            HeaderName::from_static(CLIENT_SOURCE_HEADER),
            HeaderValue::from_static(version::CLIENT_SOURCE),
        );

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(version::user_agent());
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(|e| RetrieverError::Transport {
            status: None,
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        debug!("Nimble client configured: base_url={}", config.base_url);

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NimbleConfig {
        &self.config
    }

    /// POST `body` to `{base_url}/{route}` and parse the documents out of the reply
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<Vec<RawDocument>, RetrieverError> {
        let url = self.config.endpoint(route);
        let start = Instant::now();
        debug!("POST {}", url);

        let response = self
            .client
            .post(url.as_str())
            .json(body)
            .send()
            .await
            .map_err(|e| RetrieverError::Transport {
                status: None,
                message: if e.is_timeout() {
                    format!("Nimble API {} timed out: {}", route, e)
                } else {
                    format!("Nimble API {} failed with network error: {}", route, e)
                },
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| RetrieverError::Transport {
            status: Some(status.as_u16()),
            message: format!("Failed to read response body: {}", e),
        })?;

        check_status(route, status, &text)?;
        let raw = parse_body(&text)?;

        debug!(
            "Nimble {} returned {} items in {}ms",
            route,
            raw.len(),
            start.elapsed().as_millis()
        );
        Ok(raw)
    }
}

/// One entry of the response `body` array, before normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub page_content: Option<String>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
    /// Set by the service on entries it could not resolve
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawDocument {
    pub fn is_failed(&self) -> bool {
        matches!(&self.error, Some(v) if !v.is_null())
    }

    pub fn into_document(self) -> Document {
        Document::new(
            self.page_content.unwrap_or_default(),
            self.metadata.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct NimbleResponse {
    body: Vec<RawDocument>,
}

fn check_status(route: &str, status: StatusCode, text: &str) -> Result<(), RetrieverError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!("Nimble API {} rejected credentials ({})", route, status.as_u16());
        return Err(RetrieverError::Authentication(format!(
            "Nimble API {} rejected the API key ({}): {}",
            route,
            status.as_u16(),
            text
        )));
    }

    if !status.is_success() {
        let kind = if status.is_client_error() {
            "client"
        } else {
            "server"
        };
        return Err(RetrieverError::Transport {
            status: Some(status.as_u16()),
            message: format!(
                "Nimble API {} failed with {} error ({}): {}",
                route,
                kind,
                status.as_u16(),
                text
            ),
        });
    }

    Ok(())
}

/// Parse a response body into its raw entries, preserving order
pub(crate) fn parse_body(text: &str) -> Result<Vec<RawDocument>, RetrieverError> {
    let response: NimbleResponse =
        serde_json::from_str(text).map_err(|e| RetrieverError::Parse(e.to_string()))?;
    Ok(response.body)
}
