// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Combined retriever that picks the endpoint from the query

use async_trait::async_trait;
use tracing::debug;

use super::client::NimbleClient;
use super::config::NimbleConfig;
use super::extract::NimbleExtractRetriever;
use super::params::{ExtractOptions, SearchOptions};
use super::provider::Retriever;
use super::search::NimbleSearchRetriever;
use super::types::{Document, Query, RetrieverError};

/// Retriever accepting either a text query or URLs
///
/// URL queries go to `/extract`. Text queries go to `/extract` when explicit
/// links were configured, otherwise to `/search`. Both halves share one HTTP
/// client.
#[derive(Clone)]
pub struct NimbleRetriever {
    search: NimbleSearchRetriever,
    extract: NimbleExtractRetriever,
}

impl NimbleRetriever {
    pub fn new(
        config: NimbleConfig,
        search_options: SearchOptions,
        extract_options: ExtractOptions,
    ) -> Result<Self, RetrieverError> {
        let client = NimbleClient::new(config)?;
        Ok(Self {
            search: NimbleSearchRetriever::with_client(client.clone(), search_options)?,
            extract: NimbleExtractRetriever::with_client(client, extract_options)?,
        })
    }

    /// Retriever with default options, reading connection settings from the environment
    pub fn from_env() -> Result<Self, RetrieverError> {
        Self::new(
            NimbleConfig::from_env(),
            SearchOptions::default(),
            ExtractOptions::default(),
        )
    }

    pub fn search_retriever(&self) -> &NimbleSearchRetriever {
        &self.search
    }

    pub fn extract_retriever(&self) -> &NimbleExtractRetriever {
        &self.extract
    }

    fn routes_to_extract(&self, query: &Query) -> bool {
        query.is_extraction() || self.extract.has_links()
    }
}

#[async_trait]
impl Retriever for NimbleRetriever {
    async fn retrieve(&self, query: &Query) -> Result<Vec<Document>, RetrieverError> {
        if self.routes_to_extract(query) {
            debug!("Routing query to extract");
            self.extract.retrieve(query).await
        } else {
            debug!("Routing query to search");
            self.search.retrieve(query).await
        }
    }

    fn name(&self) -> &'static str {
        "nimble"
    }
}
