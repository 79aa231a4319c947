//! Applier (§4.9): atomically promotes the staging tree to the active tree. Diff,
//! backup, apply, and post-apply re-verification with rollback on failure.

use std::collections::HashSet;
use std::path::Path;

use dipeo_codegen_errors::{CodegenError, Diagnostic, ErrorKind, Result};

use crate::cache::content_hash;
use crate::fs::FileSystem;
use crate::stager::{GeneratedFile, Manifest};
use crate::validator::{self, TypeCheckerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    Added,
    Removed,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct DiffEntry {
    pub path: String,
    pub status: DiffStatus,
}

/// Three modes the command surface exposes over the same underlying machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Syntax validation plus the optional external type checker, if configured.
    Apply,
    /// Syntax validation only; the type checker is never invoked.
    ApplySyntaxOnly,
    /// Diff only, no validation and no writes.
    DryRun,
}

/// Compares the manifest (staged content hashes) against what's actually on disk in the
/// active tree, producing a path-level diff.
pub fn diff(manifest: &Manifest, active_root: &Path, filesystem: &dyn FileSystem) -> Vec<DiffEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (path, hash) in manifest {
        seen.insert(path.clone());
        let active_path = active_root.join(path);
        let status = match filesystem.read(&active_path) {
            Ok(bytes) if &content_hash(&bytes) == hash => DiffStatus::Unchanged,
            Ok(_) => DiffStatus::Modified,
            Err(_) => DiffStatus::Added,
        };
        entries.push(DiffEntry { path: path.clone(), status });
    }

    for active_path in filesystem.glob(&["**/*"], active_root) {
        let relative = active_path
            .strip_prefix(active_root)
            .unwrap_or(&active_path)
            .to_string_lossy()
            .replace('\\', "/");
        if !seen.contains(&relative) {
            entries.push(DiffEntry {
                path: relative,
                status: DiffStatus::Removed,
            });
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Copies every file under `source_root` to `dest_root`, preserving relative paths.
fn copy_tree(source_root: &Path, dest_root: &Path, filesystem: &dyn FileSystem) -> Result<()> {
    for path in filesystem.glob(&["**/*"], source_root) {
        let relative = path.strip_prefix(source_root).unwrap_or(&path);
        let dest = dest_root.join(relative);
        if let Some(parent) = dest.parent() {
            filesystem.create_dir_all(parent)?;
        }
        let content = filesystem.read(&path)?;
        filesystem.write(&dest, &content)?;
    }
    Ok(())
}

/// Runs the Applier. `staged` is the file set exactly as written by the Stager (used to
/// re-validate without re-reading staging off disk); `manifest` is the Stager's output.
pub fn apply(
    staged: &[GeneratedFile],
    manifest: &Manifest,
    staging_root: &Path,
    active_root: &Path,
    backup_root: &Path,
    mode: ApplyMode,
    type_checker: &TypeCheckerConfig,
    filesystem: &dyn FileSystem,
) -> Result<Vec<DiffEntry>> {
    let entries = diff(manifest, active_root, filesystem);

    if mode == ApplyMode::DryRun {
        return Ok(entries);
    }

    let effective_type_checker = if mode == ApplyMode::ApplySyntaxOnly {
        TypeCheckerConfig::default()
    } else {
        type_checker.clone()
    };
    validator::validate(staged, &effective_type_checker)?;

    filesystem.remove_dir_all(backup_root)?;
    filesystem.create_dir_all(backup_root)?;
    copy_tree(active_root, backup_root, filesystem)?;

    for (path, _) in manifest {
        let staged_path = staging_root.join(path);
        let active_path = active_root.join(path);
        let content = filesystem.read(&staged_path)?;
        if let Some(parent) = active_path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write(&active_path, &content)?;
    }

    for entry in &entries {
        if entry.status == DiffStatus::Removed {
            filesystem.remove_file(&active_root.join(&entry.path))?;
        }
    }

    let written = read_active_files(manifest, active_root, staged, filesystem)?;
    if let Err(err) = validator::validate(&written, &effective_type_checker) {
        filesystem.remove_dir_all(active_root)?;
        filesystem.create_dir_all(active_root)?;
        copy_tree(backup_root, active_root, filesystem)?;
        let message = format!("post-apply verification failed, rolled back to backup: {err}");
        return Err(CodegenError::single(
            Diagnostic::new(ErrorKind::ApplyFailure, message)
                .with_remediation("inspect the staging tree for the underlying syntax error"),
        ));
    }

    Ok(entries)
}

/// Re-reads every manifest path from `active_root` (the files actually written by this
/// call, not the in-memory staged data) so post-apply verification catches a write that
/// landed corrupted or truncated. Classification is looked up from `staged` purely for
/// the Validator's dispatch-by-extension bookkeeping; the content is never reused.
fn read_active_files(
    manifest: &Manifest,
    active_root: &Path,
    staged: &[GeneratedFile],
    filesystem: &dyn FileSystem,
) -> Result<Vec<GeneratedFile>> {
    manifest
        .keys()
        .map(|path| {
            let classification = staged
                .iter()
                .find(|f| &f.path == path)
                .map(|f| f.classification)
                .unwrap_or(crate::stager::FileClassification::Model);
            let content = filesystem.read(&active_root.join(path))?;
            Ok(GeneratedFile::new(
                path.clone(),
                String::from_utf8_lossy(&content).into_owned(),
                classification,
            ))
        })
        .collect()
}
