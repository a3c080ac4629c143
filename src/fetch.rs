//! Release catalog fetching.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::types::RawRelease;

const USER_AGENT: &str = concat!("program-panel/", env!("CARGO_PKG_VERSION"));

/// Source of raw release data for choose-release programs.
pub trait CatalogFetcher {
    /// Releases in display order.
    fn fetch(&self, api_link: &str, program: &str) -> Result<Vec<RawRelease>>;
}

/// Fetches from a GitHub `releases` API endpoint.
pub struct GithubFetcher {
    client: reqwest::blocking::Client,
}

impl GithubFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("Build HTTP client")?;
        Ok(Self { client })
    }
}

impl CatalogFetcher for GithubFetcher {
    fn fetch(&self, api_link: &str, program: &str) -> Result<Vec<RawRelease>> {
        tracing::info!("Fetching releases for {} from {}", program, api_link);
        let body = self
            .client
            .get(api_link)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .with_context(|| format!("Request {}", api_link))?
            .error_for_status()
            .with_context(|| format!("Release API for {} returned an error", program))?
            .text()
            .context("Read response body")?;
        parse_releases(&body)
    }
}

/// Decode a JSON array of releases, keeping only `tag_name` and `prerelease`.
pub fn parse_releases(json: &str) -> Result<Vec<RawRelease>> {
    let releases: Vec<RawRelease> =
        serde_json::from_str(json).context("Decode release list")?;
    tracing::debug!("decoded {} releases", releases.len());
    Ok(releases)
}
