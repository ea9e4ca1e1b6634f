// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retriever trait definition

use async_trait::async_trait;

use super::blocking::BlockingRetriever;
use super::types::{Document, Query, RetrieverError};

/// Trait for implementing retrievers
///
/// A retriever turns a [`Query`] into documents with exactly one request to
/// its backing service. Implementations hold no mutable state between calls,
/// so one instance can serve concurrent tasks.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve documents for a query
    ///
    /// # Arguments
    /// * `query` - Text query or URL(s), depending on the retriever
    ///
    /// # Returns
    /// Documents in the order the service returned them, or an error
    async fn retrieve(&self, query: &Query) -> Result<Vec<Document>, RetrieverError>;

    /// Retriever name for logging
    fn name(&self) -> &'static str;

    /// Wrap this retriever in the blocking call form
    fn into_blocking(self) -> Result<BlockingRetriever<Self>, RetrieverError>
    where
        Self: Sized,
    {
        BlockingRetriever::new(self)
    }
}
