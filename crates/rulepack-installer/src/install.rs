use std::path::Path;

use anyhow::Result;
use rulepack_core::WorkspaceFs;

/// Creates `path` (and parents) unless dry-run. Existing directories are
/// left untouched.
pub fn ensure_directory(path: &Path, dry_run: bool, fs: &dyn WorkspaceFs) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    if !fs.exists(path) {
        fs.mkdir_all(path)?;
    }
    Ok(())
}

/// Writes one rule file as a single complete overwrite. Dry runs perform
/// no write at all.
pub fn write_rule_file(
    path: &Path,
    content: &str,
    dry_run: bool,
    fs: &dyn WorkspaceFs,
) -> Result<()> {
    if dry_run {
        return Ok(());
    }
    fs.write_file(path, content)
}
