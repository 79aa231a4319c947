//! Schema IR Builder (§4.5): merges GraphQL type declarations from the Backend IR with
//! operation documents from the Frontend IR into one authoritative schema, de-duplicated
//! and checked for referential closure.

use dipeo_codegen_errors::{Collector, Diagnostic, ErrorKind, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::backend::BackendIr;
use super::frontend::FrontendIr;

const BUILTIN_SCALARS: &[&str] = &["String", "Int", "Float", "Boolean", "ID", "JSON", "PersonID"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaIr {
    /// Type name -> rendered SDL block.
    pub types: IndexMap<String, String>,
    /// Entity name -> rendered operation document text.
    pub operations: IndexMap<String, String>,
}

pub fn build(backend: &BackendIr, frontend: &FrontendIr) -> Result<SchemaIr> {
    let mut collector = Collector::new();
    let mut ir = SchemaIr::default();

    for (name, decl) in &backend.enums {
        let values = decl
            .values
            .iter()
            .map(|(name, _)| format!("  {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        ir.types.insert(name.clone(), format!("enum {name} {{\n{values}\n}}"));
    }

    for (name, decl) in &backend.graphql_types {
        let fields = decl
            .fields
            .iter()
            .map(|(field_name, field_type)| format!("  {field_name}: {field_type}"))
            .collect::<Vec<_>>()
            .join("\n");
        ir.types
            .insert(name.clone(), format!("type {name} {{\n{fields}\n}}"));
    }

    let known_type = |name: &str| {
        BUILTIN_SCALARS.contains(&name) || ir.types.contains_key(name) || ir.types.contains_key(name.trim_end_matches('!'))
    };

    for decl in backend.graphql_types.values() {
        for (field_name, field_type) in &decl.fields {
            let bare = field_type.trim_start_matches('[').trim_end_matches(']').trim_end_matches('!');
            if !known_type(bare) {
                collector.push(Diagnostic::new(
                    ErrorKind::IrReference,
                    format!(
                        "type `{}` field `{field_name}` references undefined GraphQL type `{bare}`",
                        decl.name
                    ),
                ));
            }
        }
    }

    for (entity, document) in &frontend.query_documents {
        ir.operations.insert(entity.clone(), document.clone());
    }

    collector.finish_with("schema_ir", ir)
}
