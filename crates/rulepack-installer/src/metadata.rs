use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rulepack_core::WorkspaceFs;
use serde::{Deserialize, Serialize};

use crate::layout::METADATA_FILE_NAME;

/// One tracked rule file: where it came from, and the checksum of its
/// content at install time. Entries written before checksum tracking
/// existed have no checksum, so the field is omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Per-scope sidecar record mapping installed file names to their remote
/// provenance, persisted as `.metadata.json` under the scope's `.claude`
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesMetadata {
    #[serde(default)]
    pub files: BTreeMap<String, TrackedFile>,
}

impl RulesMetadata {
    /// Inserts or overwrites the entry for `file_name`.
    pub fn track(&mut self, file_name: &str, source_path: &str, checksum: Option<String>) {
        self.files.insert(
            file_name.to_string(),
            TrackedFile {
                source: source_path.to_string(),
                checksum,
            },
        );
    }

    /// Remote source path for a tracked file.
    pub fn source(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(|entry| entry.source.as_str())
    }

    /// Install-time checksum for a tracked file, if one was recorded.
    pub fn checksum(&self, file_name: &str) -> Option<&str> {
        self.files
            .get(file_name)
            .and_then(|entry| entry.checksum.as_deref())
    }
}

/// Loads the metadata sidecar for a scope directory.
///
/// An absent sidecar yields an empty record. So does an unparsable one:
/// metadata is advisory provenance state, not authoritative installed-file
/// state, and corruption must never abort an operation.
pub fn load_metadata(claude_dir: &Path, fs: &dyn WorkspaceFs) -> RulesMetadata {
    let path = claude_dir.join(METADATA_FILE_NAME);
    if !fs.exists(&path) {
        return RulesMetadata::default();
    }

    let Ok(raw) = fs.read_file(&path) else {
        return RulesMetadata::default();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

/// Persists the metadata sidecar, fully overwriting prior content.
/// Pretty-printed so scope directories stay human-diffable.
pub fn save_metadata(
    claude_dir: &Path,
    metadata: &RulesMetadata,
    fs: &dyn WorkspaceFs,
) -> Result<()> {
    let path = claude_dir.join(METADATA_FILE_NAME);
    let content =
        serde_json::to_string_pretty(metadata).context("failed to serialize rule metadata")?;
    fs.write_file(&path, &content)
        .with_context(|| format!("failed to write metadata sidecar: {}", path.display()))
}
