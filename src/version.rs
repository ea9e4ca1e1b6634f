// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Nimble retriever

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Value of the `X-Client-Source` header sent with every request
pub const CLIENT_SOURCE: &str = "nimble-retriever";

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Nimble Retriever {}", VERSION_NUMBER)
}

/// `User-Agent` header value
pub fn user_agent() -> String {
    format!("{}/{}", CLIENT_SOURCE, VERSION_NUMBER)
}
