use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::http_client;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const RULE_EXTENSION: &str = ".md";

/// A rule file available in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRule {
    pub name: String,
    pub path: String,
}

/// A language stack directory available in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStack {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEntry {
    pub(crate) name: String,
    pub(crate) path: String,
    #[serde(rename = "type")]
    pub(crate) kind: ContentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ContentKind {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// Lists available rules and stacks via a repository contents API.
///
/// Directory listings are addressed as
/// `{api_base}/repos/{owner}/{repo}/contents/{path}?ref={branch}` and
/// return entries shaped `{name, path, type}`.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    client: reqwest::blocking::Client,
}

impl RemoteCatalog {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Result<Self> {
        Self::with_api_base(DEFAULT_API_BASE, owner, repo, branch)
    }

    pub fn with_api_base(
        api_base: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            client: http_client()?,
        })
    }

    /// Rule files under the repository's `core/` directory.
    pub fn core_rules(&self) -> Result<Vec<RemoteRule>> {
        Ok(rules_from_entries(&self.list_directory("core")?))
    }

    /// Stack directories under the repository's `stacks/` directory.
    pub fn stacks(&self) -> Result<Vec<RemoteStack>> {
        Ok(stacks_from_entries(&self.list_directory("stacks")?))
    }

    /// Rule files for one named stack.
    pub fn stack_rules(&self, stack: &str) -> Result<Vec<RemoteRule>> {
        Ok(rules_from_entries(
            &self.list_directory(&format!("stacks/{stack}"))?,
        ))
    }

    fn list_directory(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let url = listing_url(&self.api_base, &self.owner, &self.repo, path, &self.branch);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to list {path}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(
                "failed to list {path}: HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        let body = response
            .text()
            .with_context(|| format!("failed to read listing body for {path}"))?;
        serde_json::from_str(&body).with_context(|| format!("failed to decode listing for {path}"))
    }
}

pub(crate) fn listing_url(
    api_base: &str,
    owner: &str,
    repo: &str,
    path: &str,
    branch: &str,
) -> String {
    format!("{api_base}/repos/{owner}/{repo}/contents/{path}?ref={branch}")
}

pub(crate) fn rules_from_entries(entries: &[ContentEntry]) -> Vec<RemoteRule> {
    entries
        .iter()
        .filter(|entry| entry.kind == ContentKind::File)
        .filter(|entry| entry.name.ends_with(RULE_EXTENSION))
        .filter(|entry| entry.name != "README.md")
        .map(|entry| RemoteRule {
            name: entry.name.clone(),
            path: entry.path.clone(),
        })
        .collect()
}

pub(crate) fn stacks_from_entries(entries: &[ContentEntry]) -> Vec<RemoteStack> {
    entries
        .iter()
        .filter(|entry| entry.kind == ContentKind::Dir)
        .map(|entry| RemoteStack {
            name: entry.name.clone(),
        })
        .collect()
}
