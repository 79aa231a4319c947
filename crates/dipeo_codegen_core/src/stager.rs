//! Stager (§4.7): writes rendered files into the staging tree and computes a manifest
//! for the diff/apply step.

use std::path::Path;

use dipeo_codegen_errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::content_hash;
use crate::fs::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClassification {
    Model,
    Enum,
    Schema,
    Operation,
    FrontendConfig,
    Validation,
    HandlerStub,
    QueryDocument,
}

/// Which output tree a Generated File belongs in, per §6's output tree layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Goes through the Stager and Applier (`diagram_generated_staged/` -> `diagram_generated/`).
    Staged,
    /// Written directly to `apps/web/src/__generated__/`, no staging.
    FrontendDirect,
    /// Written directly to the single consolidated `apps/server/schema.graphql`.
    SchemaFile,
}

impl FileClassification {
    pub fn destination(self) -> Destination {
        match self {
            Self::Model | Self::Enum | Self::Operation | Self::HandlerStub => Destination::Staged,
            Self::FrontendConfig | Self::Validation | Self::QueryDocument => Destination::FrontendDirect,
            Self::Schema => Destination::SchemaFile,
        }
    }
}

/// One rendered artifact. Exclusively owned by the Stager until `apply` promotes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Forward-slash-normalized path, relative to the staging/active root.
    pub path: String,
    pub content: String,
    pub classification: FileClassification,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, classification: FileClassification) -> Self {
        Self {
            path: normalize_path(&path.into()),
            content: normalize_newlines(&content.into()),
            classification,
        }
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_newlines(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized
    } else {
        format!("{normalized}\n")
    }
}

/// `path -> content hash`, used by the Applier's diff step.
pub type Manifest = IndexMap<String, String>;

/// Clears and recreates the staging tree, writes every file destined for it, and returns
/// the resulting manifest. Files are sorted by path before writing so two runs over
/// identical inputs touch the filesystem in the same order (§5 determinism). Files bound
/// for `Destination::FrontendDirect` or `Destination::SchemaFile` are ignored here — the
/// driver writes those straight to their own output paths.
pub fn stage(files: &[GeneratedFile], staging_root: &Path, filesystem: &dyn FileSystem) -> Result<Manifest> {
    filesystem.remove_dir_all(staging_root)?;
    filesystem.create_dir_all(staging_root)?;

    let mut sorted: Vec<&GeneratedFile> = files
        .iter()
        .filter(|f| f.classification.destination() == Destination::Staged)
        .collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut manifest = Manifest::new();
    for file in sorted {
        let full_path = staging_root.join(&file.path);
        if let Some(parent) = full_path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write(&full_path, file.content.as_bytes())?;
        manifest.insert(file.path.clone(), content_hash(file.content.as_bytes()));
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    #[test]
    fn stages_files_sorted_and_builds_a_manifest() {
        let fs = MemoryFs::new();
        let files = vec![
            GeneratedFile::new("b.py", "b", FileClassification::Model),
            GeneratedFile::new("a.py", "a", FileClassification::Model),
        ];
        let manifest = stage(&files, Path::new("/staged"), &fs).unwrap();
        assert_eq!(manifest.len(), 2);
        assert!(fs.exists(Path::new("/staged/a.py")));
        assert!(fs.exists(Path::new("/staged/b.py")));
    }

    #[test]
    fn normalizes_paths_and_trailing_newline() {
        let file = GeneratedFile::new("a\\b.py", "content", FileClassification::Model);
        assert_eq!(file.path, "a/b.py");
        assert_eq!(file.content, "content\n");
    }

    #[test]
    fn restaging_clears_previous_output() {
        let fs = MemoryFs::new();
        let first = vec![GeneratedFile::new("old.py", "x", FileClassification::Model)];
        stage(&first, Path::new("/staged"), &fs).unwrap();
        let second = vec![GeneratedFile::new("new.py", "y", FileClassification::Model)];
        stage(&second, Path::new("/staged"), &fs).unwrap();
        assert!(!fs.exists(Path::new("/staged/old.py")));
        assert!(fs.exists(Path::new("/staged/new.py")));
    }
}
