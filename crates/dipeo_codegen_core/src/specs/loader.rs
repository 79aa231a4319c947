//! Discovers Node Specifications and Query Specifications by glob and deserializes
//! their literal object initializers into the model types.

use std::path::Path;

use dipeo_codegen_errors::{Collector, Diagnostic, ErrorKind, Result};
use dipeo_codegen_ts::extract_literals_source;

use crate::fs::FileSystem;

use super::invariants::validate_node_specs;
use super::model::{NodeSpec, QuerySpec};

/// Loads every Node Specification matching `glob` under `root`, in canonical-path
/// order, and validates the cross-spec invariants from §3 in a single pass.
pub fn load_node_specs(filesystem: &dyn FileSystem, root: &Path, glob: &str) -> Result<Vec<NodeSpec>> {
    let mut paths = filesystem.glob(&[glob], root);
    paths.sort();

    let mut collector = Collector::new();
    let mut specs = Vec::new();

    for path in &paths {
        match load_one::<NodeSpec>(filesystem, path) {
            Ok(Some(spec)) => specs.push(spec),
            Ok(None) => collector.push(
                Diagnostic::new(
                    ErrorKind::SpecInvariant,
                    "no object literal in this file deserializes into a node specification",
                )
                .with_path(path),
            ),
            Err(err) => collector.extend_from(err),
        }
    }

    let specs = collector.finish_with("spec_loading", specs)?;
    validate_node_specs(&specs)?;
    Ok(specs)
}

/// Loads every Query Specification matching `glob` under `root`, in canonical-path order.
pub fn load_query_specs(filesystem: &dyn FileSystem, root: &Path, glob: &str) -> Result<Vec<QuerySpec>> {
    let mut paths = filesystem.glob(&[glob], root);
    paths.sort();

    let mut collector = Collector::new();
    let mut specs = Vec::new();

    for path in &paths {
        match load_one::<QuerySpec>(filesystem, path) {
            Ok(Some(spec)) => specs.push(spec),
            Ok(None) => {}
            Err(err) => collector.extend_from(err),
        }
    }

    collector.finish_with("spec_loading", specs)
}

/// Parses `path` (read through `filesystem`, so `MemoryFs`-backed tests never touch the
/// real disk), returning the first top-level exported literal that deserializes cleanly
/// into `T`. Literals that parse as JSON but don't match `T`'s shape are skipped rather
/// than treated as errors — a file may export unrelated constants alongside its
/// specification object.
fn load_one<T: serde::de::DeserializeOwned>(filesystem: &dyn FileSystem, path: &Path) -> Result<Option<T>> {
    let source_text = filesystem.read_to_string(path)?;
    let literals = extract_literals_source(path, &source_text)?;
    for (_, value) in literals {
        if let Ok(parsed) = serde_json::from_value::<T>(value) {
            return Ok(Some(parsed));
        }
    }
    Ok(None)
}
