// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Blocking call form for async retrievers

use tokio::runtime::{Builder, Runtime};

use super::provider::Retriever;
use super::types::{Document, Query, RetrieverError};

/// Runs an async [`Retriever`] to completion on the calling thread
///
/// Owns a current-thread runtime, so the blocking and async forms execute the
/// exact same request future. Must not be called or dropped from inside
/// another tokio runtime.
pub struct BlockingRetriever<R> {
    inner: R,
    runtime: Runtime,
}

impl<R: Retriever> BlockingRetriever<R> {
    pub fn new(inner: R) -> Result<Self, RetrieverError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Blocking equivalent of [`Retriever::retrieve`]
    pub fn retrieve(&self, query: &Query) -> Result<Vec<Document>, RetrieverError> {
        self.runtime.block_on(self.inner.retrieve(query))
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Access the wrapped async retriever
    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
