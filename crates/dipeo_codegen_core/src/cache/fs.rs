//! On-disk AST Cache backend: one JSON file per `(relative_path, content_hash)` pair,
//! living under a single cache directory. There is no index file — an entry is either
//! present or it isn't, and a missing directory is created lazily on first write.

use std::fs;
use std::path::{Path, PathBuf};

use dipeo_codegen_ts::AstRecord;

use super::Cache;

pub struct FsCache {
    dir: PathBuf,
}

impl FsCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, relative_path: &Path, content_hash: &str) -> PathBuf {
        let sanitized = relative_path.to_string_lossy().replace(['/', '\\'], "__");
        self.dir.join(format!("{sanitized}.{content_hash}.json"))
    }
}

impl Cache for FsCache {
    fn get(&self, relative_path: &Path, content_hash: &str) -> Option<AstRecord> {
        let path = self.entry_path(relative_path, content_hash);
        let raw = fs::read_to_string(path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn put(&self, relative_path: &Path, content_hash: &str, record: &AstRecord) {
        let Ok(()) = fs::create_dir_all(&self.dir) else {
            return;
        };
        let path = self.entry_path(relative_path, content_hash);
        if let Ok(json) = serde_json::to_string_pretty(record) {
            let _ = fs::write(path, json);
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let record = AstRecord { path: "models/src/a.ts".into(), declarations: vec![] };

        cache.put(Path::new("models/src/a.ts"), "deadbeef", &record);
        let loaded = cache.get(Path::new("models/src/a.ts"), "deadbeef");

        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn a_hash_change_misses_the_old_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let record = AstRecord { path: "a.ts".into(), declarations: vec![] };

        cache.put(Path::new("a.ts"), "hash1", &record);

        assert!(cache.get(Path::new("a.ts"), "hash2").is_none());
    }

    #[test]
    fn deleting_the_cache_directory_is_safe() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FsCache::new(dir.path());
        let record = AstRecord { path: "a.ts".into(), declarations: vec![] };
        cache.put(Path::new("a.ts"), "hash1", &record);

        fs::remove_dir_all(dir.path()).unwrap();

        assert!(cache.get(Path::new("a.ts"), "hash1").is_none());
        cache.put(Path::new("a.ts"), "hash1", &record);
        assert_eq!(cache.get(Path::new("a.ts"), "hash1"), Some(record));
    }
}
