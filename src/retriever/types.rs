// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types shared by the Nimble retrievers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// String metadata keys every [`Document`] carries
const STANDARD_TEXT_KEYS: &[&str] = &["title", "snippet", "url", "entity_type"];

/// A single retrieved page: its text plus whatever metadata the service returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted page text (empty when the service sent none)
    pub page_content: String,
    /// Metadata object; always has `title`, `snippet`, `url`, `position`
    /// and `entity_type`
    pub metadata: Map<String, Value>,
}

impl Document {
    /// Build a document, filling in any missing standard metadata keys
    pub fn new(page_content: impl Into<String>, mut metadata: Map<String, Value>) -> Self {
        for key in STANDARD_TEXT_KEYS {
            metadata
                .entry(key.to_string())
                .or_insert_with(|| Value::String(String::new()));
        }
        metadata
            .entry("position".to_string())
            .or_insert_with(|| Value::from(-1));
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn url(&self) -> &str {
        self.metadata
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Server-side rank, or -1 when the service did not provide one
    pub fn position(&self) -> i64 {
        self.metadata
            .get("position")
            .and_then(Value::as_i64)
            .unwrap_or(-1)
    }
}

/// The unit of work submitted to a retriever
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Free-text search query
    Text(String),
    /// A single page to extract
    Url(String),
    /// Several pages to extract in one request
    Urls(Vec<String>),
}

impl Query {
    pub fn text(query: impl Into<String>) -> Self {
        Self::Text(query.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    pub fn urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Urls(urls.into_iter().map(Into::into).collect())
    }

    /// True for the URL-carrying variants
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Url(_) | Self::Urls(_))
    }
}

impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Query {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Query {
    fn from(value: Vec<String>) -> Self {
        Self::Urls(value)
    }
}

/// Search specialization; selects the engine and parameters used server-side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchTopic {
    /// Broad web search
    #[default]
    General,
    /// Real-time news
    News,
    /// Location-based results
    Location,
}

impl SearchTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::News => "news",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for SearchTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format the service uses for `page_content`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ParsingType {
    #[default]
    PlainText,
    Markdown,
    SimplifiedHtml,
}

impl ParsingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Markdown => "markdown",
            Self::SimplifiedHtml => "simplified_html",
        }
    }
}

impl fmt::Display for ParsingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by retrievers; none are retried internally
#[derive(Debug, Error)]
pub enum RetrieverError {
    /// API key missing, or rejected by the service (401/403)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Network failure or non-success HTTP status
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Error message or response text
        message: String,
    },

    /// Response body is not JSON or lacks expected fields
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Input unusable for this retriever
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Why the query was rejected
        reason: String,
    },

    /// Constructor options failed validation
    #[error("Invalid parameters: {reason}")]
    InvalidParams {
        /// Which option is wrong and why
        reason: String,
    },

    /// The blocking call form could not start its runtime
    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl RetrieverError {
    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// HTTP status attached to the error, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
