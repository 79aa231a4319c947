//! Frontend IR Builder (§4.5): field configuration records, node model records,
//! GraphQL query documents, validation schemas, and the node-type registry.

use dipeo_codegen_errors::{Collector, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{OverrideTable, TargetLanguage};
use crate::specs::{NodeSpec, QuerySpec, Selection};
use crate::type_mapper::{self, EnumRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfigEntry {
    pub name: String,
    pub input_widget: Option<String>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<Value>>,
    pub hidden: bool,
    pub conditional: Option<(String, Vec<Value>)>,
    pub validation_fragment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeModelRecord {
    pub node_type: String,
    pub display_name: String,
    pub category: String,
    pub primary_display_field: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub module_path: Option<String>,
    pub field_config_name: String,
    pub defaults: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendIr {
    pub field_configs: IndexMap<String, Vec<FieldConfigEntry>>,
    pub node_models: IndexMap<String, NodeModelRecord>,
    pub query_documents: IndexMap<String, String>,
    pub validation_schemas: IndexMap<String, Vec<(String, String)>>,
    pub node_registry: IndexMap<String, RegistryEntry>,
}

pub fn build(
    specs: &[NodeSpec],
    queries: &[QuerySpec],
    enums: &EnumRegistry,
    target: TargetLanguage,
    overrides: &OverrideTable,
) -> Result<FrontendIr> {
    let mut collector = Collector::new();
    let mut ir = FrontendIr::default();

    for spec in specs {
        let mut entries = Vec::with_capacity(spec.fields.len());
        let mut validations: Vec<String> = Vec::with_capacity(spec.fields.len());
        let mut defaults = IndexMap::new();

        for field in &spec.fields {
            let ui = field.ui.as_ref();
            entries.push(FieldConfigEntry {
                name: field.name.clone(),
                input_widget: ui.and_then(|u| u.input_widget.clone()),
                placeholder: ui.and_then(|u| u.placeholder.clone()),
                options: ui.and_then(|u| u.options.clone()),
                hidden: ui.map(|u| u.hidden).unwrap_or(false),
                conditional: field
                    .conditional
                    .as_ref()
                    .map(|c| (c.field.clone(), c.values.clone())),
                validation_fragment: match type_mapper::map_field(
                    target,
                    &spec.node_type,
                    field,
                    enums,
                    overrides,
                ) {
                    Ok(mapped) => mapped.validation_fragment,
                    Err(err) => {
                        collector.extend_from(err);
                        String::new()
                    }
                },
            });

            if let Some(default) = &field.default_value {
                defaults.insert(field.name.clone(), default.clone());
            }
        }

        ir.field_configs.insert(spec.node_type.clone(), entries);
        ir.validation_schemas.insert(
            spec.node_type.clone(),
            spec.fields
                .iter()
                .map(|f| {
                    let fragment = type_mapper::map_field(target, &spec.node_type, f, enums, overrides)
                        .map(|m| m.validation_fragment)
                        .unwrap_or_default();
                    (f.name.clone(), fragment)
                })
                .collect(),
        );

        ir.node_models.insert(
            spec.node_type.clone(),
            NodeModelRecord {
                node_type: spec.node_type.clone(),
                display_name: spec.display_name.clone(),
                category: spec.category.clone(),
                primary_display_field: spec.primary_display_field.clone(),
                fields: spec.fields.iter().map(|f| f.name.clone()).collect(),
            },
        );

        ir.node_registry.insert(
            spec.node_type.clone(),
            RegistryEntry {
                module_path: spec.handler_metadata.as_ref().map(|m| m.module_path.clone()),
                field_config_name: format!("{}FieldConfig", spec.node_type),
                defaults,
            },
        );
    }

    for query in queries {
        let document = render_query_document(query);
        ir.query_documents.insert(query.entity_name.clone(), document);
    }

    collector.finish_with("frontend_ir", ir)
}

fn render_query_document(query: &QuerySpec) -> String {
    let mut out = String::new();
    for op in &query.operations {
        let keyword = match op.kind {
            crate::specs::OperationKind::Query => "query",
            crate::specs::OperationKind::Mutation => "mutation",
            crate::specs::OperationKind::Subscription => "subscription",
        };
        let variables = op
            .variables
            .iter()
            .map(|v| {
                format!(
                    "${}: {}{}",
                    v.name,
                    v.gql_type,
                    if v.required { "!" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let header = if variables.is_empty() {
            format!("{keyword} {} {{", op.name)
        } else {
            format!("{keyword} {}({variables}) {{", op.name)
        };
        out.push_str(&header);
        out.push('\n');
        render_selection(&op.selection, 1, &mut out);
        out.push_str("}\n\n");
    }
    out
}

fn render_selection(selection: &[Selection], indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    for item in selection {
        match item {
            Selection::Field(name) => {
                out.push_str(&pad);
                out.push_str(name);
                out.push('\n');
            }
            Selection::Nested { name, fields } => {
                out.push_str(&pad);
                out.push_str(name);
                out.push_str(" {\n");
                render_selection(fields, indent + 1, out);
                out.push_str(&pad);
                out.push_str("}\n");
            }
        }
    }
}
