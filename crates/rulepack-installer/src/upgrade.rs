use std::path::Path;

use anyhow::{anyhow, Result};
use rulepack_core::{is_newer, parse_frontmatter, sha256_hex, ContentSource, WorkspaceFs};

use crate::discovery::discover_installed_rules;
use crate::layout::{Scope, ScopeLayout};
use crate::metadata::{load_metadata, RulesMetadata};

/// Flags controlling an upgrade pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeOptions {
    /// Overwrite files that were modified locally since install.
    pub force: bool,
    /// Categorize every file as a real run would, but write nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file: String,
    pub error: String,
}

/// Complete tally of one scope's upgrade pass. Every discovered file
/// lands in exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    pub upgraded: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub errors: Vec<FailedFile>,
}

impl UpgradeReport {
    pub fn is_empty(&self) -> bool {
        self.upgraded.is_empty() && self.skipped.is_empty() && self.errors.is_empty()
    }
}

/// Upgrade reports for both scopes of a combined run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedUpgradeReports {
    pub global: UpgradeReport,
    pub project: UpgradeReport,
}

enum FileDecision {
    Upgraded,
    Skipped(String),
    Failed(String),
}

/// Reconciles every installed rule file in `rules_dir` against its remote
/// source of truth.
///
/// Each file is decided independently: a fetch failure, missing metadata,
/// or unreadable file is recorded for that file alone and never aborts
/// the rest of the pass. The metadata sidecar under `claude_dir` is read
/// once and never mutated here; dry runs produce the same categorization
/// as a real run with zero writes.
pub fn upgrade_scope(
    rules_dir: &Path,
    claude_dir: &Path,
    source: &dyn ContentSource,
    options: UpgradeOptions,
    fs: &dyn WorkspaceFs,
) -> Result<UpgradeReport> {
    let metadata = load_metadata(claude_dir, fs);
    let installed = discover_installed_rules(rules_dir, fs)?;

    let mut report = UpgradeReport::default();
    for path in installed {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        match reconcile_file(&path, &file_name, &metadata, source, options, fs) {
            FileDecision::Upgraded => report.upgraded.push(file_name),
            FileDecision::Skipped(reason) => report.skipped.push(SkippedFile {
                file: file_name,
                reason,
            }),
            FileDecision::Failed(error) => report.errors.push(FailedFile {
                file: file_name,
                error,
            }),
        }
    }

    Ok(report)
}

fn reconcile_file(
    path: &Path,
    file_name: &str,
    metadata: &RulesMetadata,
    source: &dyn ContentSource,
    options: UpgradeOptions,
    fs: &dyn WorkspaceFs,
) -> FileDecision {
    let local_content = match fs.read_file(path) {
        Ok(content) => content,
        Err(err) => return FileDecision::Failed(format!("{err:#}")),
    };

    let Some(local_meta) = parse_frontmatter(&local_content) else {
        return FileDecision::Skipped("No version metadata found".to_string());
    };

    let Some(remote_path) = metadata.source(file_name) else {
        return FileDecision::Failed(
            "File not tracked in metadata (was it installed with an older version?)".to_string(),
        );
    };

    let remote_content = match source.fetch_file(remote_path) {
        Ok(content) => content,
        Err(err) => return FileDecision::Failed(format!("{err:#}")),
    };

    let Some(remote_meta) = parse_frontmatter(&remote_content) else {
        return FileDecision::Failed("Remote file has no version metadata".to_string());
    };

    if !is_newer(&local_meta.version, &remote_meta.version) {
        return FileDecision::Skipped(format!("Already up to date (v{})", local_meta.version));
    }

    // Entries installed before checksum tracking have no stored checksum;
    // those files are treated as unmodified and stay upgradable.
    let modified = metadata
        .checksum(file_name)
        .is_some_and(|stored| sha256_hex(&local_content) != stored);

    if modified && !options.force {
        return FileDecision::Skipped("Modified locally (use --force to overwrite)".to_string());
    }

    if !options.dry_run {
        if let Err(err) = fs.write_file(path, &remote_content) {
            return FileDecision::Failed(format!("{err:#}"));
        }
    }

    FileDecision::Upgraded
}

/// Runs the project and global scope upgrades concurrently and returns
/// both reports.
///
/// The two passes touch disjoint directories and disjoint metadata
/// sidecars, so they need no coordination; an absent scope directory
/// simply yields an empty report, and one scope's failures never affect
/// the other's result.
pub fn upgrade_all_scopes(
    project_root: &Path,
    home_dir: &Path,
    source: &dyn ContentSource,
    options: UpgradeOptions,
    fs: &dyn WorkspaceFs,
) -> Result<ScopedUpgradeReports> {
    let global_layout = ScopeLayout::new(Scope::Global, project_root, home_dir);
    let project_layout = ScopeLayout::new(Scope::Project, project_root, home_dir);

    std::thread::scope(|scope| {
        let global = scope.spawn(|| {
            upgrade_scope(
                &global_layout.rules_dir(),
                global_layout.claude_dir(),
                source,
                options,
                fs,
            )
        });
        let project = scope.spawn(|| {
            upgrade_scope(
                &project_layout.rules_dir(),
                project_layout.claude_dir(),
                source,
                options,
                fs,
            )
        });

        Ok(ScopedUpgradeReports {
            global: global
                .join()
                .map_err(|_| anyhow!("global scope upgrade thread panicked"))??,
            project: project
                .join()
                .map_err(|_| anyhow!("project scope upgrade thread panicked"))??,
        })
    })
}
