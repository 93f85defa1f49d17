use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// A directory entry as reported by [`WorkspaceFs::list_directory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
    pub is_directory: bool,
}

/// Filesystem capability set the installer and upgrade engine depend on.
///
/// The engine never touches a concrete runtime directly; hosts supply an
/// adapter (normally [`OsFs`]) so local state handling stays testable and
/// portable.
pub trait WorkspaceFs: Send + Sync {
    fn mkdir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Result<String>;
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>>;
}

/// [`WorkspaceFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl WorkspaceFs for OsFs {
    fn mkdir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("failed to create {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in
            fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?
        {
            let entry = entry?;
            let file_type = entry.file_type()?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_file: file_type.is_file(),
                is_directory: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}
