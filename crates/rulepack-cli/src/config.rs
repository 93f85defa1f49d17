use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::RepoOverrides;

pub(crate) const CONFIG_FILE_NAME: &str = "rulepack.toml";

/// Remote repository coordinates, loaded from `~/.claude/rulepack.toml`
/// when present. Unlike the advisory metadata sidecar, a malformed config
/// file is a real error: silently ignoring it would point every command
/// at the wrong repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RepoConfig {
    #[serde(default = "default_owner")]
    pub repo_owner: String,
    #[serde(default = "default_repo")]
    pub repo_name: String,
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_owner(),
            repo_name: default_repo(),
            default_branch: default_branch(),
        }
    }
}

impl RepoConfig {
    pub(crate) fn with_overrides(mut self, overrides: RepoOverrides) -> Self {
        if let Some(owner) = overrides.owner {
            self.repo_owner = owner;
        }
        if let Some(repo) = overrides.repo {
            self.repo_name = repo;
        }
        if let Some(branch) = overrides.branch {
            self.default_branch = branch;
        }
        self
    }
}

pub(crate) fn load_repo_config(home_dir: &Path) -> Result<RepoConfig> {
    let path = home_dir.join(".claude").join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(RepoConfig::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed reading config: {}", path.display()))?;
    parse_repo_config(&content).with_context(|| format!("failed parsing config: {}", path.display()))
}

pub(crate) fn parse_repo_config(content: &str) -> Result<RepoConfig> {
    Ok(toml::from_str(content)?)
}

fn default_owner() -> String {
    "elitwilson".to_string()
}

fn default_repo() -> String {
    "claude-workflows".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}
