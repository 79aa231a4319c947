//! Frontend render functions (§4.6): one per `frontend::` Generated File classification.
//! Each renders TypeScript (consumed directly by the web app, per §6 — frontend output
//! is not staged) from the Frontend IR.

use dipeo_codegen_errors::Result;
use serde_json::Value;

use crate::ir::{BackendIr, FrontendIr, SchemaIr};
use crate::stager::{FileClassification, GeneratedFile};

fn json_literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

pub fn render_field_configs(_backend: &BackendIr, frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(frontend.field_configs.len());
    for (node_type, entries) in &frontend.field_configs {
        let mut body = String::new();
        body.push_str(&format!("export const {node_type}FieldConfig = [\n"));
        for entry in entries {
            body.push_str("  {\n");
            body.push_str(&format!("    name: \"{}\",\n", entry.name));
            if let Some(widget) = &entry.input_widget {
                body.push_str(&format!("    inputWidget: \"{widget}\",\n"));
            }
            if let Some(placeholder) = &entry.placeholder {
                body.push_str(&format!("    placeholder: \"{placeholder}\",\n"));
            }
            if let Some(options) = &entry.options {
                let rendered = options.iter().map(json_literal).collect::<Vec<_>>().join(", ");
                body.push_str(&format!("    options: [{rendered}],\n"));
            }
            body.push_str(&format!("    hidden: {},\n", entry.hidden));
            if let Some((field, values)) = &entry.conditional {
                let rendered = values.iter().map(json_literal).collect::<Vec<_>>().join(", ");
                body.push_str(&format!("    conditional: {{ field: \"{field}\", values: [{rendered}] }},\n"));
            }
            body.push_str("  },\n");
        }
        body.push_str("] as const;\n");
        files.push(GeneratedFile::new(
            format!("config/{node_type}FieldConfig.ts"),
            body,
            FileClassification::FrontendConfig,
        ));
    }
    Ok(files)
}

pub fn render_node_models(_backend: &BackendIr, frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(frontend.node_models.len());
    for (node_type, record) in &frontend.node_models {
        let fields = record.fields.iter().map(|f| format!("\"{f}\"")).collect::<Vec<_>>().join(", ");
        let body = format!(
            "export const {node_type}Model = {{\n  nodeType: \"{}\",\n  displayName: \"{}\",\n  category: \"{}\",\n  primaryDisplayField: \"{}\",\n  fields: [{fields}],\n}} as const;\n",
            record.node_type, record.display_name, record.category, record.primary_display_field
        );
        files.push(GeneratedFile::new(
            format!("models/{node_type}.ts"),
            body,
            FileClassification::FrontendConfig,
        ));
    }
    Ok(files)
}

pub fn render_query_documents(_backend: &BackendIr, frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(frontend.query_documents.len());
    for (entity, document) in &frontend.query_documents {
        files.push(GeneratedFile::new(
            format!("queries/{entity}.graphql"),
            document.clone(),
            FileClassification::QueryDocument,
        ));
    }
    Ok(files)
}

pub fn render_validation_schemas(_backend: &BackendIr, frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    let mut files = Vec::with_capacity(frontend.validation_schemas.len());
    for (node_type, fields) in &frontend.validation_schemas {
        let mut body = String::from("import { z } from \"zod\";\n\n");
        body.push_str(&format!("export const {node_type}Schema = z.object({{\n"));
        for (name, fragment) in fields {
            body.push_str(&format!("  {name}: {fragment},\n"));
        }
        body.push_str("});\n");
        files.push(GeneratedFile::new(
            format!("validation/{node_type}.ts"),
            body,
            FileClassification::Validation,
        ));
    }
    Ok(files)
}

pub fn render_node_registry(_backend: &BackendIr, frontend: &FrontendIr, _schema: &SchemaIr) -> Result<Vec<GeneratedFile>> {
    if frontend.node_registry.is_empty() {
        return Ok(Vec::new());
    }
    let mut body = String::from("export const nodeRegistry = {\n");
    for (node_type, entry) in &frontend.node_registry {
        let defaults = entry
            .defaults
            .iter()
            .map(|(k, v)| format!("{k}: {}", json_literal(v)))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!("  {node_type}: {{\n"));
        if let Some(module_path) = &entry.module_path {
            body.push_str(&format!("    modulePath: \"{module_path}\",\n"));
        }
        body.push_str(&format!("    fieldConfigName: \"{}\",\n", entry.field_config_name));
        body.push_str(&format!("    defaults: {{ {defaults} }},\n"));
        body.push_str("  },\n");
    }
    body.push_str("} as const;\n");
    Ok(vec![GeneratedFile::new(
        "registry.ts",
        body,
        FileClassification::FrontendConfig,
    )])
}
