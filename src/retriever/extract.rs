// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Nimble extract retriever
//!
//! Fetches page content for one or more URLs via `POST /extract`. URLs the
//! service fails to resolve are dropped from the result instead of failing
//! the whole call.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::client::{NimbleClient, RawDocument};
use super::config::NimbleConfig;
use super::params::{validate_link_count, ExtractOptions, ExtractRequest};
use super::provider::Retriever;
use super::types::{Document, Query, RetrieverError};

const EXTRACT_ROUTE: &str = "extract";

/// Extraction-style retriever over the Nimble API
#[derive(Clone)]
pub struct NimbleExtractRetriever {
    client: NimbleClient,
    options: ExtractOptions,
}

impl NimbleExtractRetriever {
    pub fn new(config: NimbleConfig, options: ExtractOptions) -> Result<Self, RetrieverError> {
        Self::with_client(NimbleClient::new(config)?, options)
    }

    pub fn with_client(client: NimbleClient, options: ExtractOptions) -> Result<Self, RetrieverError> {
        options.validate()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Whether explicit links were configured at construction
    pub fn has_links(&self) -> bool {
        !self.options.links.is_empty()
    }

    /// Extract content for `links`, in one request
    pub async fn extract(&self, links: &[String]) -> Result<Vec<Document>, RetrieverError> {
        validate_link_count(links.len(), false)?;
        if links.iter().any(|l| l.trim().is_empty()) {
            return Err(RetrieverError::invalid_query("URLs must not be empty"));
        }

        debug!("Extracting {} links with driver {}", links.len(), self.options.driver);

        let request = ExtractRequest::new(links, &self.options);
        let raw = self.client.post(EXTRACT_ROUTE, &request).await?;

        let mut documents = Vec::with_capacity(raw.len());
        for entry in raw {
            if entry.is_failed() {
                warn!(
                    "Skipping unresolved link {}: {}",
                    failed_url(&entry),
                    entry.error.as_ref().map(ToString::to_string).unwrap_or_default()
                );
                continue;
            }
            documents.push(entry.into_document());
        }

        info!(
            "Extract complete: {} of {} links resolved",
            documents.len(),
            links.len()
        );
        Ok(documents)
    }

    /// The link list a query maps to
    fn links_for(&self, query: &Query) -> Vec<String> {
        match query {
            Query::Url(url) => vec![url.clone()],
            Query::Urls(urls) => urls.clone(),
            Query::Text(text) if self.has_links() => {
                debug!("Explicit links configured, ignoring text query '{}'", text);
                self.options.links.clone()
            }
            Query::Text(text) => vec![text.trim().to_string()],
        }
    }
}

fn failed_url(entry: &RawDocument) -> &str {
    entry
        .metadata
        .as_ref()
        .and_then(|m| m.get("url"))
        .and_then(|v| v.as_str())
        .unwrap_or("<unknown>")
}

#[async_trait]
impl Retriever for NimbleExtractRetriever {
    async fn retrieve(&self, query: &Query) -> Result<Vec<Document>, RetrieverError> {
        let links = self.links_for(query);
        self.extract(&links).await
    }

    fn name(&self) -> &'static str {
        "nimble_extract"
    }
}
