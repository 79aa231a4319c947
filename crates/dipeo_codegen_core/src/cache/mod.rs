//! The AST Cache: avoids re-parsing unchanged TypeScript files.
//!
//! Keyed by `(relative_path, sha256(content))`. The cache is invalidation-free — content
//! addressing guarantees correctness on its own — and safe to delete at any time. Missing
//! entries simply fall back to extraction; stale entries (same path, different hash) are
//! ignored and overwritten rather than explicitly evicted.

mod fs;
mod memory;
mod noop;

pub use fs::FsCache;
pub use memory::MemoryCache;
pub use noop::NoCache;

use std::path::Path;

use dipeo_codegen_ts::AstRecord;
use sha2::{Digest, Sha256};

/// Pluggable backend for the AST Cache. Implementations own persistence; callers
/// always address entries by content hash, never by mtime.
pub trait Cache: Send + Sync {
    /// Looks up a cached record for `relative_path` whose content hashed to
    /// `content_hash`. A `None` covers both "never seen" and "hash changed".
    fn get(&self, relative_path: &Path, content_hash: &str) -> Option<AstRecord>;

    /// Stores (or overwrites) the record for `relative_path` at `content_hash`.
    fn put(&self, relative_path: &Path, content_hash: &str, record: &AstRecord);

    /// Persists any buffered state. A no-op for backends with no buffering.
    fn flush(&self) -> std::io::Result<()>;
}

/// `sha256(content)`, hex-encoded — the second half of every cache key.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

fn cache_key(relative_path: &Path, content_hash: &str) -> String {
    format!("{}@{content_hash}", relative_path.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable() {
        assert_eq!(content_hash(b"hello"), content_hash(b"hello"));
        assert_ne!(content_hash(b"hello"), content_hash(b"world"));
    }
}
