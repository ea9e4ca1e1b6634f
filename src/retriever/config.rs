// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Connection settings for the Nimble API

use std::env;
use std::fmt;
use url::Url;

/// Production endpoint used when `NIMBLE_API_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://nimble-retriever.webit.live";

/// Connection configuration, fixed at retriever construction
#[derive(Clone)]
pub struct NimbleConfig {
    /// API key sent as a bearer token
    pub api_key: Option<String>,
    /// Base URL; `/search` and `/extract` are appended to it
    pub base_url: String,
    /// Request timeout; `None` keeps the HTTP client's own default
    pub request_timeout_ms: Option<u64>,
}

impl NimbleConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("NIMBLE_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: env::var("NIMBLE_API_URL")
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout_ms: env::var("NIMBLE_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Configuration with an explicit key and the default endpoint
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL '{}': {}", self.base_url, e))?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(format!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }
        if self.request_timeout_ms == Some(0) {
            return Err("Request timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    /// `{base_url}/{route}` without doubled slashes
    pub(crate) fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), route)
    }
}

impl Default for NimbleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

// Keeps the key out of logs and panic messages
impl fmt::Debug for NimbleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NimbleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}
