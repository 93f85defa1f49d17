use anyhow::Result;

/// Remote content seam used by the install and upgrade flows.
///
/// This is the only network boundary the engine sees; transport
/// concerns (timeouts, TLS, retries) belong to the implementation.
pub trait ContentSource: Send + Sync {
    /// Fetches the raw content of one rule file by its repository-relative
    /// path, e.g. `core/tdd-workflow.md`.
    fn fetch_file(&self, relative_path: &str) -> Result<String>;
}
