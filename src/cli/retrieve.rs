// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::retriever::{
    BaseParams, Document, ExtractOptions, NimbleConfig, NimbleExtractRetriever,
    NimbleSearchRetriever, ParsingType, Query, Retriever, SearchOptions, SearchTopic,
    DEFAULT_BASE_URL,
};

/// Connection settings shared by every command
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Nimble API key (can also be set via NIMBLE_API_KEY env var)
    #[arg(long, env = "NIMBLE_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Nimble API
    #[arg(long, env = "NIMBLE_API_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in milliseconds (HTTP client default when unset)
    #[arg(long, env = "NIMBLE_REQUEST_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,
}

impl ConnectionArgs {
    pub fn into_config(self) -> NimbleConfig {
        NimbleConfig {
            api_key: self.api_key,
            base_url: self.base_url,
            request_timeout_ms: self.timeout_ms,
        }
    }
}

/// Options shared by search and extract
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Result locale
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Result country code
    #[arg(long, default_value = "US")]
    pub country: String,

    /// Format of the returned page content
    #[arg(long, value_enum, default_value_t = ParsingType::PlainText)]
    pub parsing_type: ParsingType,
}

impl CommonArgs {
    fn into_base(self) -> BaseParams {
        BaseParams {
            locale: self.locale,
            country: self.country,
            parsing_type: self.parsing_type,
        }
    }
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Number of results (1-100)
    #[arg(long, short = 'k', default_value_t = 3)]
    pub k: usize,

    /// Search topic
    #[arg(long, value_enum, default_value_t = SearchTopic::General)]
    pub topic: SearchTopic,

    /// Return metadata and snippets only instead of full page content
    #[arg(long)]
    pub no_deep_search: bool,

    /// Ask for a generated answer summary (requires --no-deep-search)
    #[arg(long)]
    pub include_answer: bool,

    /// Only return results from this domain (repeatable)
    #[arg(long = "include-domain")]
    pub include_domains: Vec<String>,

    /// Never return results from this domain (repeatable)
    #[arg(long = "exclude-domain")]
    pub exclude_domains: Vec<String>,

    /// Results after this date (YYYY or YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Results before this date (YYYY or YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl SearchArgs {
    fn options(self) -> (String, SearchOptions) {
        let options = SearchOptions {
            num_results: self.k,
            topic: self.topic,
            deep_search: !self.no_deep_search,
            include_answer: self.include_answer,
            include_domains: non_empty(self.include_domains),
            exclude_domains: non_empty(self.exclude_domains),
            start_date: self.start_date,
            end_date: self.end_date,
            base: self.common.into_base(),
        };
        (self.query, options)
    }
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// URLs to extract (at most 20)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Browser driver used by the service
    #[arg(long, default_value = "vx6")]
    pub driver: String,

    /// Render delay in milliseconds
    #[arg(long)]
    pub wait: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run a search and print the documents
pub async fn search(config: NimbleConfig, args: SearchArgs) -> Result<()> {
    let (query, options) = args.options();
    let retriever =
        NimbleSearchRetriever::new(config, options).context("Failed to create search retriever")?;

    let documents = retriever
        .retrieve(&Query::Text(query))
        .await
        .context("Search failed")?;
    print_documents(&documents)
}

/// Extract the given URLs and print the documents
pub async fn extract(config: NimbleConfig, args: ExtractArgs) -> Result<()> {
    let options = ExtractOptions {
        links: Vec::new(),
        driver: args.driver,
        wait: args.wait,
        base: args.common.into_base(),
    };
    let retriever = NimbleExtractRetriever::new(config, options)
        .context("Failed to create extract retriever")?;

    let documents = retriever
        .retrieve(&Query::Urls(args.urls))
        .await
        .context("Extraction failed")?;
    print_documents(&documents)
}

fn print_documents(documents: &[Document]) -> Result<()> {
    info!("Retrieved {} documents", documents.len());
    println!("{}", serde_json::to_string_pretty(documents)?);
    Ok(())
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
