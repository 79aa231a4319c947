//! Template Engine (§4.6): renders IR nodes through a registry of named render
//! functions, organized by target family. No external templating crate — none of the
//! reference stack uses one, and this mirrors the teacher's dispatch-by-string-name
//! generator lookup.

pub mod backend;
pub mod filters;
pub mod frontend;
pub mod schema;

use dipeo_codegen_errors::{Collector, Result};

use crate::ir::{BackendIr, FrontendIr, SchemaIr};
use crate::stager::{Destination, GeneratedFile};

pub type RenderFn = fn(&BackendIr, &FrontendIr, &SchemaIr) -> Result<Vec<GeneratedFile>>;

/// Every render function, keyed by `family::classification`. Looked up by name only —
/// never via reflection — so the set of Generated Files a run can produce is always
/// enumerable ahead of time.
pub const REGISTRY: &[(&str, RenderFn)] = &[
    ("backend::models", backend::render_models),
    ("backend::enums", backend::render_enums),
    ("backend::operations", backend::render_operations),
    ("backend::handler_stubs", backend::render_handler_stubs),
    ("frontend::field_configs", frontend::render_field_configs),
    ("frontend::node_models", frontend::render_node_models),
    ("frontend::query_documents", frontend::render_query_documents),
    ("frontend::validation_schemas", frontend::render_validation_schemas),
    ("frontend::node_registry", frontend::render_node_registry),
    ("schema::schema_file", schema::render_schema_file),
];

/// Runs every render function in the registry, in a fixed order, folding failures from
/// any one of them into a single aggregate rather than aborting at the first.
pub fn render_all(backend: &BackendIr, frontend: &FrontendIr, schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut collector = Collector::new();
    let mut files = Vec::new();
    for (_name, render_fn) in REGISTRY {
        match render_fn(backend, frontend, schema) {
            Ok(mut produced) => files.append(&mut produced),
            Err(err) => collector.extend_from(err),
        }
    }
    collector.finish_with("template_render", files)
}

/// Splits a fully-rendered file set by output destination (§6): staged files go through
/// the Stager/Applier, frontend files are written directly, and the schema file is its
/// own single output.
pub fn partition_by_destination(files: Vec<GeneratedFile>) -> (Vec<GeneratedFile>, Vec<GeneratedFile>, Vec<GeneratedFile>) {
    let mut staged = Vec::new();
    let mut frontend = Vec::new();
    let mut schema = Vec::new();
    for file in files {
        match file.classification.destination() {
            Destination::Staged => staged.push(file),
            Destination::FrontendDirect => frontend.push(file),
            Destination::SchemaFile => schema.push(file),
        }
    }
    (staged, frontend, schema)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::config::{OverrideTable, TargetLanguage};
    use crate::specs::{ExecutionConfig, FieldSpec, HandleConfig, NodeSpec};
    use crate::type_mapper::EnumRegistry;

    fn spec() -> NodeSpec {
        NodeSpec {
            node_type: "http_request".to_string(),
            display_name: "HTTP Request".to_string(),
            category: "integration".to_string(),
            icon: String::new(),
            color: String::new(),
            description: String::new(),
            primary_display_field: "url".to_string(),
            fields: vec![FieldSpec {
                name: "url".to_string(),
                field_type: "string".to_string(),
                required: true,
                default_value: None,
                description: String::new(),
                validation: None,
                ui: None,
                nested_fields: None,
                conditional: None,
            }],
            handles: HandleConfig::default(),
            input_ports: vec![],
            outputs: IndexMap::new(),
            execution: ExecutionConfig::default(),
            handler_metadata: None,
            examples: IndexMap::new(),
        }
    }

    #[test]
    fn registry_renders_a_model_file_for_every_spec() {
        let backend = crate::ir::backend::build(&[spec()], &[], &[], TargetLanguage::Python, &OverrideTable::default()).unwrap();
        let frontend = crate::ir::frontend::build(&[spec()], &[], &EnumRegistry::default(), TargetLanguage::Python, &OverrideTable::default()).unwrap();
        let schema = crate::ir::schema::build(&backend, &frontend).unwrap();
        let files = render_all(&backend, &frontend, &schema).unwrap();
        assert!(files.iter().any(|f| f.path == "models/http_request.py"));
        assert!(files.iter().any(|f| f.path == "schema.graphql"));
    }

    #[test]
    fn partitions_staged_frontend_and_schema_outputs() {
        let backend = crate::ir::backend::build(&[spec()], &[], &[], TargetLanguage::Python, &OverrideTable::default()).unwrap();
        let frontend = crate::ir::frontend::build(&[spec()], &[], &EnumRegistry::default(), TargetLanguage::Python, &OverrideTable::default()).unwrap();
        let schema = crate::ir::schema::build(&backend, &frontend).unwrap();
        let files = render_all(&backend, &frontend, &schema).unwrap();
        let (staged, frontend_files, schema_files) = partition_by_destination(files);
        assert!(staged.iter().any(|f| f.path == "models/http_request.py"));
        assert!(frontend_files.iter().any(|f| f.path == "models/http_request.ts"));
        assert_eq!(schema_files.len(), 1);
        assert_eq!(schema_files[0].path, "schema.graphql");
    }
}
