//! Schema render function (§4.6): the single consolidated `.graphql` Generated File.

use dipeo_codegen_errors::Result;

use crate::ir::{BackendIr, FrontendIr, SchemaIr};
use crate::stager::{FileClassification, GeneratedFile};

pub fn render_schema_file(_backend: &BackendIr, _frontend: &FrontendIr, schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    if schema.types.is_empty() && schema.operations.is_empty() {
        return Ok(Vec::new());
    }
    let mut body = String::new();
    for block in schema.types.values() {
        body.push_str(block);
        body.push_str("\n\n");
    }
    for document in schema.operations.values() {
        body.push_str(document);
    }
    Ok(vec![GeneratedFile::new(
        "schema.graphql",
        body,
        FileClassification::Schema,
    )])
}
