// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Nimble search retriever
//!
//! Sends a text query to `POST /search` with the configured result count,
//! topic and deep-search settings.

use async_trait::async_trait;
use tracing::{debug, info};

use super::client::{NimbleClient, RawDocument};
use super::config::NimbleConfig;
use super::params::{SearchOptions, SearchRequest};
use super::provider::Retriever;
use super::types::{Document, Query, RetrieverError};

const SEARCH_ROUTE: &str = "search";

/// Search-style retriever over the Nimble API
#[derive(Clone)]
pub struct NimbleSearchRetriever {
    client: NimbleClient,
    options: SearchOptions,
}

impl NimbleSearchRetriever {
    /// Create a search retriever
    ///
    /// # Arguments
    /// * `config` - Connection settings; must carry an API key
    /// * `options` - Search options, validated here
    pub fn new(config: NimbleConfig, options: SearchOptions) -> Result<Self, RetrieverError> {
        Self::with_client(NimbleClient::new(config)?, options)
    }

    /// Create a search retriever sharing an existing client
    pub fn with_client(client: NimbleClient, options: SearchOptions) -> Result<Self, RetrieverError> {
        options.validate()?;
        Ok(Self { client, options })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Run one search for `query`
    pub async fn search(&self, query: &str) -> Result<Vec<Document>, RetrieverError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RetrieverError::invalid_query("query must not be empty"));
        }

        debug!(
            "Searching: topic={}, num_results={}, deep_search={}",
            self.options.topic, self.options.num_results, self.options.deep_search
        );

        let request = SearchRequest {
            query,
            options: &self.options,
        };
        let raw = self.client.post(SEARCH_ROUTE, &request).await?;

        let limit = self.options.num_results;
        if raw.len() > limit {
            debug!("Service returned {} results, keeping first {}", raw.len(), limit);
        }
        let documents: Vec<Document> = raw
            .into_iter()
            .take(limit)
            .map(RawDocument::into_document)
            .collect();

        info!("Search complete: {} documents", documents.len());
        Ok(documents)
    }
}

#[async_trait]
impl Retriever for NimbleSearchRetriever {
    async fn retrieve(&self, query: &Query) -> Result<Vec<Document>, RetrieverError> {
        match query {
            Query::Text(text) | Query::Url(text) => self.search(text).await,
            Query::Urls(_) => Err(RetrieverError::invalid_query(
                "search expects a single text query, not a list of URLs",
            )),
        }
    }

    fn name(&self) -> &'static str {
        "nimble_search"
    }
}
