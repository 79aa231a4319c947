//! # dipeo_codegen_core
//!
//! Core model-driven code generation pipeline. Reads TypeScript Node Specifications
//! and Query Specifications plus the AST of every TypeScript source file under a
//! project root, builds a backend IR, a frontend IR and a GraphQL schema IR from them,
//! renders each IR into generated source text, and promotes that text into the active
//! output tree through a staging directory with syntax validation and rollback.
//!
//! ## Pipeline
//!
//! ```text
//! codegen.config.json
//!     ↓
//! Driver::discover()   -- glob sources, extract ASTs (AST Cache), load specs
//!     ↓
//! Driver::build_irs()  -- Type Mapper -> BackendIr / FrontendIr / SchemaIr
//!     ↓
//! render::render_all() -- Template Engine, dispatch by explicit registry
//!     ↓
//! stager::stage()       -- write the staged subset, build a content-hash manifest
//!     ↓
//! validator::validate()  -- mandatory syntax validation before promotion
//!     ↓
//! applier::apply()       -- diff, backup, promote, re-verify, rollback on failure
//! ```
//!
//! This crate is designed to be called from the `dipeo_codegen_cli` binary or
//! embedded directly by any other Rust code that wants the pipeline without a
//! subprocess boundary.

pub mod applier;
pub mod cache;
pub mod casing;
pub mod config;
pub mod diagnostic;
mod error;
pub mod driver;
pub mod fs;
pub mod ir;
pub mod render;
pub mod specs;
pub mod stager;
pub mod type_mapper;
pub mod validator;

pub use applier::{ApplyMode, DiffEntry, DiffStatus};
pub use cache::{Cache, FsCache, MemoryCache, NoCache};
pub use config::{CodegenConfig, FieldOverride, OutputPaths, OverrideTable, SourceGlobs, TargetLanguage};
pub use diagnostic::{ColorChoice, render_error};
pub use driver::{Driver, GenerateOutput};
pub use error::{Collector, Diagnostic as CodegenDiagnostic, Error, ErrorKind, Result};
pub use fs::{FileSystem, MemoryFs, RealFs};
pub use ir::{BackendIr, FrontendIr, SchemaIr};
pub use stager::{FileClassification, GeneratedFile, Manifest};
pub use validator::TypeCheckerConfig;
