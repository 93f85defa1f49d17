use sha2::{Digest, Sha256};

/// SHA-256 of the exact UTF-8 bytes of `content`, as lowercase hex.
///
/// No normalization is applied before hashing: the frontmatter block,
/// line endings, and all whitespace are part of the digest, so any
/// byte-level edit to an installed file changes its checksum.
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
