//! Backend render functions (§4.6): one per `backend::` Generated File classification.
//! Each renders Python source from the Backend IR; GraphQL SDL itself is rendered by
//! [`crate::render::schema`].

use dipeo_codegen_errors::Result;

use crate::ir::{BackendIr, FrontendIr, SchemaIr};
use crate::render::filters::{default_value_expr, pascal_case};
use crate::stager::{FileClassification, GeneratedFile};

pub fn render_models(backend: &BackendIr, _frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(backend.models.len());
    for (node_type, model) in &backend.models {
        let class_name = format!("{}Data", pascal_case(node_type));
        let mut body = String::new();
        body.push_str("from dataclasses import dataclass, field\n");
        body.push_str("from typing import Any, Optional\n\n\n");
        body.push_str(&format!("@dataclass\nclass {class_name}:\n"));
        if model.fields.is_empty() {
            body.push_str("    pass\n");
        }
        for f in &model.fields {
            let default = f
                .default_literal
                .clone()
                .or_else(|| default_value_expr(&f.lang_type, f.default_value.as_ref()));
            match default {
                Some(default) => body.push_str(&format!("    {}: {} = {default}\n", f.name, f.lang_type)),
                None => body.push_str(&format!("    {}: {}\n", f.name, f.lang_type)),
            }
        }
        files.push(GeneratedFile::new(
            format!("models/{node_type}.py"),
            body,
            FileClassification::Model,
        ));
    }
    Ok(files)
}

pub fn render_enums(backend: &BackendIr, _frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(backend.enums.len());
    for (name, decl) in &backend.enums {
        let mut body = String::new();
        body.push_str("from enum import Enum\n\n\n");
        body.push_str(&format!("class {name}(str, Enum):\n"));
        if decl.values.is_empty() {
            body.push_str("    pass\n");
        }
        for (member, value) in &decl.values {
            let literal = value.clone().unwrap_or_else(|| member.clone());
            body.push_str(&format!("    {member} = \"{literal}\"\n"));
        }
        files.push(GeneratedFile::new(
            format!("enums/{name}.py"),
            body,
            FileClassification::Enum,
        ));
    }
    Ok(files)
}

pub fn render_handler_stubs(backend: &BackendIr, _frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(backend.handler_stubs.len());
    for (node_type, stub) in &backend.handler_stubs {
        if !stub.emit_file {
            continue;
        }
        let body = format!(
            "class {}:\n    \"\"\"Generated handler stub for `{node_type}`.\"\"\"\n\n    def execute(self, inputs):\n        raise NotImplementedError\n",
            stub.class_name
        );
        let path = stub.module_path.replace('.', "/") + ".py";
        files.push(GeneratedFile::new(path, body, FileClassification::HandlerStub));
    }
    Ok(files)
}

pub fn render_operations(backend: &BackendIr, _frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    if backend.operations.is_empty() {
        return Ok(Vec::new());
    }
    let mut body = String::new();
    body.push_str("from enum import Enum\n\n\n");
    body.push_str("class OperationName(str, Enum):\n");
    for op in &backend.operations {
        body.push_str(&format!("    {} = \"{}\"\n", op.name, op.name));
    }
    Ok(vec![GeneratedFile::new(
        "operations/registry.py",
        body,
        FileClassification::Operation,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::backend::{DataModel, ModelField};
    use indexmap::IndexMap;

    #[test]
    fn default_literal_override_wins_over_json_default() {
        let mut models = IndexMap::new();
        models.insert(
            "http_request".to_string(),
            DataModel {
                node_type: "http_request".to_string(),
                fields: vec![ModelField {
                    name: "method".to_string(),
                    lang_type: "HttpMethod".to_string(),
                    gql_type: "HttpMethod".to_string(),
                    required: true,
                    default_value: Some(serde_json::json!("GET")),
                    default_literal: Some("HttpMethod.GET".to_string()),
                }],
            },
        );
        let backend = BackendIr {
            models,
            ..BackendIr::default()
        };
        let files = render_models(&backend, &FrontendIr::default(), &SchemaIr::default()).unwrap();
        assert!(files[0].content.contains("method: HttpMethod = HttpMethod.GET"));
    }
}
