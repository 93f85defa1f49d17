use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rulepack_core::ContentSource;

use crate::http_client;

/// Fetches raw rule file content over HTTP.
///
/// Files are addressed as `{base}/{branch}/{relative_path}`. Each request
/// carries a timestamp query parameter to defeat CDN caching on the raw
/// content host.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    base_url: String,
    branch: String,
    client: reqwest::blocking::Client,
}

impl HttpContentSource {
    pub fn new(base_url: impl Into<String>, branch: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            branch: branch.into(),
            client: http_client()?,
        })
    }

    /// Content source for a GitHub repository's raw file host.
    pub fn github(owner: &str, repo: &str, branch: &str) -> Result<Self> {
        Self::new(
            format!("https://raw.githubusercontent.com/{owner}/{repo}"),
            branch,
        )
    }

    pub(crate) fn file_url(&self, relative_path: &str) -> String {
        let cache_buster = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        raw_file_url(&self.base_url, &self.branch, relative_path, cache_buster)
    }
}

impl ContentSource for HttpContentSource {
    fn fetch_file(&self, relative_path: &str) -> Result<String> {
        let url = self.file_url(relative_path);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to fetch {relative_path}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "failed to fetch {relative_path}: HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        response
            .text()
            .with_context(|| format!("failed to read response body for {relative_path}"))
    }
}

pub(crate) fn raw_file_url(
    base_url: &str,
    branch: &str,
    relative_path: &str,
    cache_buster: u128,
) -> String {
    format!("{base_url}/{branch}/{relative_path}?t={cache_buster}")
}
