//! Configuration types for the code generation pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dipeo_codegen_errors::{CodegenError, Diagnostic, ErrorKind, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level configuration, deserialized from `codegen.config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodegenConfig {
    /// Project root all other paths are relative to.
    pub root: PathBuf,

    #[serde(default)]
    pub source_globs: SourceGlobs,

    #[serde(default)]
    pub output: OutputPaths,

    #[serde(default)]
    pub target_language: TargetLanguage,

    /// Declarative `(spec_name, field_name)` overrides — the only sanctioned escape
    /// hatch when the Type Mapper cannot produce the desired target expression.
    #[serde(default)]
    pub overrides: Vec<FieldOverride>,
}

impl CodegenConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            CodegenError::single(Diagnostic::new(
                ErrorKind::ParseError,
                format!("invalid config: {e}"),
            ))
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&raw)?;
        if config.root.is_relative()
            && let Some(parent) = path.parent()
        {
            config.root = parent.join(&config.root);
        }
        Ok(config)
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn override_table(&self) -> OverrideTable {
        OverrideTable::from(self.overrides.clone())
    }
}

/// Glob patterns identifying the three source inputs (§6).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceGlobs {
    pub all_sources: String,
    pub node_specs: String,
    pub query_specs: String,
}

impl Default for SourceGlobs {
    fn default() -> Self {
        Self {
            all_sources: "models/src/**/*.ts".into(),
            node_specs: "models/src/specifications/nodes/*.spec.ts".into(),
            query_specs: "models/src/frontend/query-definitions/*.ts".into(),
        }
    }
}

/// The five output locations the pipeline is allowed to write to (§6).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputPaths {
    pub ast_cache: PathBuf,
    pub staged: PathBuf,
    pub active: PathBuf,
    pub frontend_generated: PathBuf,
    pub schema_file: PathBuf,
    /// Timestamped-per-run backup of the active tree, taken before every Applier write.
    /// Not part of the distilled output tree layout, but required by the Applier's
    /// backup/rollback step (§4.9); kept under `temp/` alongside the AST Cache.
    pub backup: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            ast_cache: "temp/ast_cache".into(),
            staged: "diagram_generated_staged".into(),
            active: "diagram_generated".into(),
            frontend_generated: "apps/web/src/__generated__".into(),
            schema_file: "apps/server/schema.graphql".into(),
            backup: "temp/diagram_generated_backup".into(),
        }
    }
}

/// The statically-typed backend target. Only `Python` has a renderer today; other
/// variants are accepted by config and rejected with a `type_mapping` error at
/// runtime, so adding a second target later is not an API break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetLanguage {
    #[default]
    Python,
}

/// One `(spec_name, field_name) -> overrides` entry. TS spec defaults are otherwise
/// authoritative; an override is used only when automatic type mapping cannot produce
/// the desired target expression (§4.4, §9 "FIELD_SPECIAL_HANDLING").
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldOverride {
    pub spec_name: String,
    pub field_name: String,
    #[serde(default)]
    pub target_default: Option<String>,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub gql_type: Option<String>,
}

/// Indexed view of the override table, keyed by `(spec_name, field_name)`.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<(String, String), FieldOverride>,
}

impl OverrideTable {
    pub fn lookup(&self, spec_name: &str, field_name: &str) -> Option<&FieldOverride> {
        self.entries
            .get(&(spec_name.to_string(), field_name.to_string()))
    }
}

impl From<Vec<FieldOverride>> for OverrideTable {
    fn from(overrides: Vec<FieldOverride>) -> Self {
        let entries = overrides
            .into_iter()
            .map(|o| ((o.spec_name.clone(), o.field_name.clone()), o))
            .collect();
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_config_with_defaults() {
        let json = r#"{ "root": "/project" }"#;
        let config = CodegenConfig::from_json(json).unwrap();
        assert_eq!(config.root, PathBuf::from("/project"));
        assert_eq!(config.output.active, PathBuf::from("diagram_generated"));
        assert_eq!(config.target_language, TargetLanguage::Python);
    }

    #[test]
    fn override_table_looks_up_by_spec_and_field() {
        let overrides = vec![FieldOverride {
            spec_name: "http_request".into(),
            field_name: "method".into(),
            target_default: Some("\"GET\"".into()),
            target_type: None,
            gql_type: None,
        }];
        let table = OverrideTable::from(overrides);

        assert!(table.lookup("http_request", "method").is_some());
        assert!(table.lookup("http_request", "other").is_none());
    }
}
