use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

const USER_AGENT: &str = concat!("solsync/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// One upstream-reported compiler build entry. Fields beyond these four
/// (`longVersion`, `build`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamBuildDescriptor {
    pub version: String,
    pub path: String,
    pub keccak256: String,
    pub sha256: String,
}

/// The upstream build list. Transient; exists only for the duration of one
/// run and is never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamBuildList {
    pub builds: Vec<UpstreamBuildDescriptor>,
}

/// Builds the blocking HTTP client used for the single upstream read.
///
/// # Errors
/// Returns an error if the client cannot be constructed.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .no_proxy()
        .build()
        .context("failed to build http client")
}

/// Fetches the upstream build list from `url` and decodes it.
///
/// The fetch and the decode are independent failure points; each carries
/// the URL in its error context.
///
/// # Errors
/// Returns an error on network failure, a non-success status, or a body
/// that does not decode as a build list.
pub fn fetch_build_list(client: &Client, url: &str) -> Result<UpstreamBuildList> {
    let body = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .with_context(|| format!("unexpected response for {url}"))?
        .text()
        .with_context(|| format!("failed to read response body from {url}"))?;
    parse_build_list(&body).with_context(|| format!("failed to parse upstream build list from {url}"))
}

/// Decodes an upstream build list document.
///
/// # Errors
/// Returns a decode error naming the first missing or mistyped field.
pub fn parse_build_list(body: &str) -> Result<UpstreamBuildList> {
    Ok(serde_json::from_str(body)?)
}
