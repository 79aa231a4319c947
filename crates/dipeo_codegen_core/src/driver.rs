//! The single-threaded Driver (§5, §6): orchestrates extract -> load -> build -> render
//! -> stage -> validate -> apply and exposes the command surface (`generate`,
//! `diff-staged`, `validate-staged`, `apply`, `dry-run`).

use std::path::PathBuf;

use dipeo_codegen_errors::Result;
use dipeo_codegen_ts::AstRecord;

use crate::applier::{self, ApplyMode, DiffEntry};
use crate::cache::Cache;
use crate::config::CodegenConfig;
use crate::fs::FileSystem;
use crate::ir::{self, BackendIr, FrontendIr, SchemaIr};
use crate::render;
use crate::specs::{self, NodeSpec, QuerySpec};
use crate::stager::{self, GeneratedFile, Manifest};
use crate::type_mapper::EnumRegistry;
use crate::validator::{self, TypeCheckerConfig};

/// Everything the `generate` phase produced, threaded into the later command-surface
/// entry points without re-running earlier phases.
#[derive(Debug)]
pub struct GenerateOutput {
    pub staged_files: Vec<GeneratedFile>,
    pub manifest: Manifest,
}

pub struct Driver<'a> {
    config: &'a CodegenConfig,
    filesystem: &'a dyn FileSystem,
    cache: &'a dyn Cache,
    type_checker: TypeCheckerConfig,
}

impl<'a> Driver<'a> {
    pub fn new(config: &'a CodegenConfig, filesystem: &'a dyn FileSystem, cache: &'a dyn Cache) -> Self {
        Self {
            config,
            filesystem,
            cache,
            type_checker: TypeCheckerConfig::default(),
        }
    }

    pub fn with_type_checker(mut self, type_checker: TypeCheckerConfig) -> Self {
        self.type_checker = type_checker;
        self
    }

    /// Reads every path through `filesystem` (so `MemoryFs`-backed tests never touch the
    /// real disk) and extracts it, consulting the AST Cache by content hash first.
    fn extract_with_cache(&self, paths: &[PathBuf]) -> Result<Vec<AstRecord>> {
        let mut records = Vec::with_capacity(paths.len());
        let mut diagnostics = Vec::new();

        for path in paths {
            let relative = path.strip_prefix(&self.config.root).unwrap_or(path).to_path_buf();
            let source_text = self.filesystem.read_to_string(path)?;
            let hash = crate::cache::content_hash(source_text.as_bytes());

            if let Some(record) = self.cache.get(&relative, &hash) {
                records.push(record);
                continue;
            }

            match dipeo_codegen_ts::extract_source(path, &source_text) {
                Ok(record) => {
                    self.cache.put(&relative, &hash, &record);
                    records.push(record);
                }
                Err(err) => diagnostics.extend(err.into_diagnostics()),
            }
        }

        self.cache.flush()?;

        if diagnostics.is_empty() {
            Ok(records)
        } else {
            Err(dipeo_codegen_errors::CodegenError::aggregate("ast_extraction", diagnostics))
        }
    }

    fn discover(&self) -> Result<(Vec<AstRecord>, Vec<NodeSpec>, Vec<QuerySpec>)> {
        let mut all_sources = self
            .filesystem
            .glob(&[self.config.source_globs.all_sources.as_str()], &self.config.root);
        all_sources.sort();

        let records = self.extract_with_cache(&all_sources)?;
        let node_specs = specs::load_node_specs(self.filesystem, &self.config.root, &self.config.source_globs.node_specs)?;
        let query_specs = specs::load_query_specs(self.filesystem, &self.config.root, &self.config.source_globs.query_specs)?;

        Ok((records, node_specs, query_specs))
    }

    fn build_irs(
        &self,
        records: &[AstRecord],
        node_specs: &[NodeSpec],
        query_specs: &[QuerySpec],
    ) -> Result<(BackendIr, FrontendIr, SchemaIr)> {
        let overrides = self.config.override_table();
        let enums = EnumRegistry::from_records(records);

        let backend = ir::backend::build(node_specs, query_specs, records, self.config.target_language, &overrides)?;
        let frontend = ir::frontend::build(node_specs, query_specs, &enums, self.config.target_language, &overrides)?;
        let schema = ir::schema::build(&backend, &frontend)?;

        Ok((backend, frontend, schema))
    }

    /// Runs the full pipeline through staging: extract, load, build, render, stage.
    /// Frontend artifacts and the schema file are written directly (§6), bypassing the
    /// Stager entirely.
    pub fn generate(&self) -> Result<GenerateOutput> {
        let (records, node_specs, query_specs) = self.discover()?;
        let (backend, frontend, schema) = self.build_irs(&records, &node_specs, &query_specs)?;

        let files = render::render_all(&backend, &frontend, &schema)?;
        let (staged_files, frontend_files, schema_files) = render::partition_by_destination(files);

        let staging_root = self.config.resolve(&self.config.output.staged);
        let manifest = stager::stage(&staged_files, &staging_root, self.filesystem)?;

        let frontend_root = self.config.resolve(&self.config.output.frontend_generated);
        self.filesystem.remove_dir_all(&frontend_root)?;
        self.filesystem.create_dir_all(&frontend_root)?;
        for file in &frontend_files {
            let path = frontend_root.join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write(&path, file.content.as_bytes())?;
        }

        let schema_path = self.config.resolve(&self.config.output.schema_file);
        if let Some(file) = schema_files.into_iter().next() {
            if let Some(parent) = schema_path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write(&schema_path, file.content.as_bytes())?;
        }

        Ok(GenerateOutput { staged_files, manifest })
    }

    /// `diff-staged` / the diff portion of `dry-run`: compares staging vs active.
    pub fn diff_staged(&self, manifest: &Manifest) -> Vec<DiffEntry> {
        let active_root = self.config.resolve(&self.config.output.active);
        applier::diff(manifest, &active_root, self.filesystem)
    }

    /// `validate-staged [--syntax-only]`.
    pub fn validate_staged(&self, staged_files: &[GeneratedFile], syntax_only: bool) -> Result<()> {
        let type_checker = if syntax_only { TypeCheckerConfig::default() } else { self.type_checker.clone() };
        validator::validate(staged_files, &type_checker)
    }

    /// `apply [--syntax-only]` and `dry-run`.
    pub fn apply(&self, output: &GenerateOutput, mode: ApplyMode) -> Result<Vec<DiffEntry>> {
        let staging_root = self.config.resolve(&self.config.output.staged);
        let active_root = self.config.resolve(&self.config.output.active);
        let backup_root = self.config.resolve(&self.config.output.backup);

        applier::apply(
            &output.staged_files,
            &output.manifest,
            &staging_root,
            &active_root,
            &backup_root,
            mode,
            &self.type_checker,
            self.filesystem,
        )
    }
}
