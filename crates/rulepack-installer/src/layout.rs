use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rulepack_core::WorkspaceFs;

pub(crate) const CLAUDE_DIR_NAME: &str = ".claude";
pub(crate) const RULES_DIR_NAME: &str = "rules";
pub(crate) const METADATA_FILE_NAME: &str = ".metadata.json";

/// Installation target for rule files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The repository-local `.claude` directory.
    Project,
    /// The user-home `.claude` directory.
    Global,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Global => "global",
        }
    }
}

/// Maps a scope to its `.claude` directory. Pure: no filesystem access,
/// no validation that either root exists.
pub fn target_directory(scope: Scope, project_root: &Path, home_dir: &Path) -> PathBuf {
    match scope {
        Scope::Project => project_root.join(CLAUDE_DIR_NAME),
        Scope::Global => home_dir.join(CLAUDE_DIR_NAME),
    }
}

/// Path layout for one scope's installation directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLayout {
    claude_dir: PathBuf,
}

impl ScopeLayout {
    pub fn new(scope: Scope, project_root: &Path, home_dir: &Path) -> Self {
        Self {
            claude_dir: target_directory(scope, project_root, home_dir),
        }
    }

    /// Layout over an explicit `.claude` directory.
    pub fn for_dir(claude_dir: impl Into<PathBuf>) -> Self {
        Self {
            claude_dir: claude_dir.into(),
        }
    }

    pub fn claude_dir(&self) -> &Path {
        &self.claude_dir
    }

    pub fn rules_dir(&self) -> PathBuf {
        self.claude_dir.join(RULES_DIR_NAME)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.claude_dir.join(METADATA_FILE_NAME)
    }

    pub fn ensure_base_dirs(&self, fs: &dyn WorkspaceFs) -> Result<()> {
        for dir in [self.claude_dir.clone(), self.rules_dir()] {
            fs.mkdir_all(&dir)?;
        }
        Ok(())
    }
}

/// Resolves the user's home directory from `$HOME`.
pub fn default_home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot resolve home directory")?;
    Ok(PathBuf::from(home))
}
