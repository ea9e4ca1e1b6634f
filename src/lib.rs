// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod retriever;
pub mod version;

// Re-export main types
pub use retriever::{
    BlockingRetriever, Document, ExtractOptions, NimbleConfig, NimbleExtractRetriever,
    NimbleRetriever, NimbleSearchRetriever, ParsingType, Query, Retriever, RetrieverError,
    SearchOptions, SearchTopic,
};
