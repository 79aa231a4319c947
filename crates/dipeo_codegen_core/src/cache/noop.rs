//! A cache backend that never remembers anything — used for `--no-cache`.

use std::path::Path;

use dipeo_codegen_ts::AstRecord;

use super::Cache;

#[derive(Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _relative_path: &Path, _content_hash: &str) -> Option<AstRecord> {
        None
    }

    fn put(&self, _relative_path: &Path, _content_hash: &str, _record: &AstRecord) {}

    fn flush(&self) -> std::io::Result<()> {
        Ok(())
    }
}
