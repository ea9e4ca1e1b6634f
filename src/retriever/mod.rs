// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Nimble web search and content extraction retrievers
//!
//! Turns a text query or a set of URLs into [`Document`]s with one call to
//! the Nimble API:
//! - `NimbleSearchRetriever` for `POST /search`
//! - `NimbleExtractRetriever` for `POST /extract`
//! - `NimbleRetriever` to route between the two by query kind
//!
//! Every retriever is async; wrap one in [`BlockingRetriever`] for the
//! blocking call form.
//!
//! ## Usage
//!
//! ```ignore
//! let config = NimbleConfig::from_env();
//! let retriever = NimbleSearchRetriever::new(config, SearchOptions::default().with_k(5))?;
//! let docs = retriever.retrieve(&Query::text("rust async runtimes")).await?;
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod extract;
pub mod params;
pub mod provider;
pub mod routing;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use blocking::BlockingRetriever;
pub use client::NimbleClient;
pub use config::{NimbleConfig, DEFAULT_BASE_URL};
pub use extract::NimbleExtractRetriever;
pub use params::{BaseParams, ExtractOptions, SearchOptions};
pub use provider::Retriever;
pub use routing::NimbleRetriever;
pub use search::NimbleSearchRetriever;
pub use types::{Document, ParsingType, Query, RetrieverError, SearchTopic};
