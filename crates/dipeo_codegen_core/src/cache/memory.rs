//! In-memory AST Cache backend, used by tests and by `--no-cache`-adjacent callers
//! that still want caching within a single process run.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use dipeo_codegen_ts::AstRecord;

use super::{Cache, cache_key};

#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, AstRecord>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, relative_path: &Path, content_hash: &str) -> Option<AstRecord> {
        self.entries
            .read()
            .unwrap()
            .get(&cache_key(relative_path, content_hash))
            .cloned()
    }

    fn put(&self, relative_path: &Path, content_hash: &str, record: &AstRecord) {
        self.entries
            .write()
            .unwrap()
            .insert(cache_key(relative_path, content_hash), record.clone());
    }

    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dipeo_codegen_ts::AstRecord;

    #[test]
    fn round_trips_by_content_hash() {
        let cache = MemoryCache::new();
        let record = AstRecord { path: "a.ts".into(), declarations: vec![] };
        cache.put(Path::new("a.ts"), "hash1", &record);

        assert_eq!(cache.get(Path::new("a.ts"), "hash1"), Some(record));
        assert_eq!(cache.get(Path::new("a.ts"), "hash2"), None);
    }
}
