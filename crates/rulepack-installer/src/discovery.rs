use std::path::{Path, PathBuf};

use anyhow::Result;
use rulepack_core::WorkspaceFs;

const RULE_EXTENSION: &str = ".md";

/// Lists the rule files currently installed in `rules_dir`.
///
/// An absent directory yields an empty list. Only regular files with the
/// markdown extension are kept; subdirectories are excluded. Order is
/// whatever the directory listing yields.
pub fn discover_installed_rules(rules_dir: &Path, fs: &dyn WorkspaceFs) -> Result<Vec<PathBuf>> {
    if !fs.exists(rules_dir) {
        return Ok(Vec::new());
    }

    let entries = fs.list_directory(rules_dir)?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.is_file && entry.name.ends_with(RULE_EXTENSION))
        .map(|entry| rules_dir.join(entry.name))
        .collect())
}
