// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request parameters for the `/search` and `/extract` endpoints
//!
//! Options are fixed at retriever construction and validated once there.
//! The request bodies are built per call by combining them with the query.

use chrono::NaiveDate;
use serde::Serialize;

use super::types::{ParsingType, RetrieverError, SearchTopic};

/// Bounds accepted by the search endpoint for `num_results`
pub const MIN_NUM_RESULTS: usize = 1;
pub const MAX_NUM_RESULTS: usize = 100;

/// Maximum number of links per extract request
pub const MAX_EXTRACT_LINKS: usize = 20;

pub const DEFAULT_NUM_RESULTS: usize = 3;
pub const DEFAULT_DRIVER: &str = "vx6";

/// Parameters shared by both endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseParams {
    /// Result locale, e.g. "en", "fr"
    pub locale: String,
    /// Result country code, e.g. "US", "FR"
    pub country: String,
    pub parsing_type: ParsingType,
}

impl Default for BaseParams {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            country: "US".to_string(),
            parsing_type: ParsingType::default(),
        }
    }
}

impl BaseParams {
    fn validate(&self) -> Result<(), RetrieverError> {
        if self.locale.trim().is_empty() {
            return Err(RetrieverError::invalid_params("locale must not be empty"));
        }
        if self.country.trim().is_empty() {
            return Err(RetrieverError::invalid_params("country must not be empty"));
        }
        Ok(())
    }
}

/// Search configuration captured by [`NimbleSearchRetriever`](super::search::NimbleSearchRetriever)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOptions {
    /// Number of results to request (1-100)
    pub num_results: usize,
    pub topic: SearchTopic,
    /// Fetch full page content for every hit instead of snippets only
    pub deep_search: bool,
    /// Ask the service for a generated answer summary; requires `deep_search = false`
    pub include_answer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_domains: Option<Vec<String>>,
    /// Lower date bound, `YYYY` or `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Upper date bound, `YYYY` or `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub base: BaseParams,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num_results: DEFAULT_NUM_RESULTS,
            topic: SearchTopic::default(),
            deep_search: true,
            include_answer: false,
            include_domains: None,
            exclude_domains: None,
            start_date: None,
            end_date: None,
            base: BaseParams::default(),
        }
    }
}

impl SearchOptions {
    /// Shorthand for the result count, `k` in retriever terms
    pub fn with_k(mut self, k: usize) -> Self {
        self.num_results = k;
        self
    }

    pub fn with_topic(mut self, topic: SearchTopic) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_deep_search(mut self, deep_search: bool) -> Self {
        self.deep_search = deep_search;
        self
    }

    pub fn validate(&self) -> Result<(), RetrieverError> {
        if !(MIN_NUM_RESULTS..=MAX_NUM_RESULTS).contains(&self.num_results) {
            return Err(RetrieverError::invalid_params(format!(
                "num_results must be between {} and {}, got {}",
                MIN_NUM_RESULTS, MAX_NUM_RESULTS, self.num_results
            )));
        }
        if self.deep_search && self.include_answer {
            return Err(RetrieverError::invalid_params(
                "deep_search and include_answer cannot both be enabled",
            ));
        }
        validate_domains("include_domains", self.include_domains.as_deref())?;
        validate_domains("exclude_domains", self.exclude_domains.as_deref())?;
        if let Some(date) = &self.start_date {
            validate_date("start_date", date)?;
        }
        if let Some(date) = &self.end_date {
            validate_date("end_date", date)?;
        }
        self.base.validate()
    }
}

/// Body of a `POST /search` request
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    #[serde(flatten)]
    pub options: &'a SearchOptions,
}

/// Extraction configuration captured by [`NimbleExtractRetriever`](super::extract::NimbleExtractRetriever)
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Pages to extract when the caller passes a text query; may be empty
    pub links: Vec<String>,
    /// Browser driver used by the service
    pub driver: String,
    /// Optional render delay in milliseconds
    pub wait: Option<u64>,
    pub base: BaseParams,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            driver: DEFAULT_DRIVER.to_string(),
            wait: None,
            base: BaseParams::default(),
        }
    }
}

impl ExtractOptions {
    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), RetrieverError> {
        validate_link_count(self.links.len(), true)?;
        if self.driver.trim().is_empty() {
            return Err(RetrieverError::invalid_params("driver must not be empty"));
        }
        self.base.validate()
    }
}

/// Body of a `POST /extract` request
#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub links: &'a [String],
    pub driver: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
    #[serde(flatten)]
    pub base: &'a BaseParams,
}

impl<'a> ExtractRequest<'a> {
    pub fn new(links: &'a [String], options: &'a ExtractOptions) -> Self {
        Self {
            links,
            driver: &options.driver,
            wait: options.wait,
            base: &options.base,
        }
    }
}

/// Check a link count against the extract endpoint's limits
pub(crate) fn validate_link_count(count: usize, allow_empty: bool) -> Result<(), RetrieverError> {
    if count == 0 && !allow_empty {
        return Err(RetrieverError::invalid_query("at least one URL is required"));
    }
    if count > MAX_EXTRACT_LINKS {
        return Err(RetrieverError::invalid_params(format!(
            "at most {} links per extract request, got {}",
            MAX_EXTRACT_LINKS, count
        )));
    }
    Ok(())
}

fn validate_domains(field: &str, domains: Option<&[String]>) -> Result<(), RetrieverError> {
    if let Some(domains) = domains {
        if domains.iter().any(|d| d.trim().is_empty()) {
            return Err(RetrieverError::invalid_params(format!(
                "{} must not contain empty entries",
                field
            )));
        }
    }
    Ok(())
}

/// Accepts `YYYY` or `YYYY-MM-DD`
fn validate_date(field: &str, value: &str) -> Result<(), RetrieverError> {
    let is_year = value.len() == 4 && value.chars().all(|c| c.is_ascii_digit());
    if is_year || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return Ok(());
    }
    Err(RetrieverError::invalid_params(format!(
        "{} must be YYYY or YYYY-MM-DD, got '{}'",
        field, value
    )))
}
