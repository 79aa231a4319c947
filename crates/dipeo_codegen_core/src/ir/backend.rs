//! Backend IR Builder (§4.5): enums, data models, GraphQL type declarations, operation
//! types, and handler stub metadata keyed by node type.

use dipeo_codegen_errors::{Collector, Result};
use dipeo_codegen_ts::ast::{AstRecord, DeclarationDetail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::casing::constant_case;
use crate::config::{OverrideTable, TargetLanguage};
use crate::specs::{NodeSpec, OperationKind, QuerySpec};
use crate::type_mapper::{self, EnumRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub values: Vec<(String, Option<String>)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelField {
    pub name: String,
    pub lang_type: String,
    pub gql_type: String,
    pub required: bool,
    pub default_value: Option<Value>,
    /// A `targetDefault` override, rendered verbatim instead of `default_value` when
    /// present.
    pub default_literal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataModel {
    pub node_type: String,
    pub fields: Vec<ModelField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlTypeDecl {
    pub name: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OperationVariant {
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDecl {
    pub entity_name: String,
    pub name: String,
    pub kind: OperationVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerStub {
    pub node_type: String,
    pub module_path: String,
    pub class_name: String,
    pub emit_file: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendIr {
    pub enums: IndexMap<String, EnumDecl>,
    pub models: IndexMap<String, DataModel>,
    pub graphql_types: IndexMap<String, GraphqlTypeDecl>,
    pub operations: Vec<OperationDecl>,
    pub handler_stubs: IndexMap<String, HandlerStub>,
}

pub fn build(
    specs: &[NodeSpec],
    queries: &[QuerySpec],
    records: &[AstRecord],
    target: TargetLanguage,
    overrides: &OverrideTable,
) -> Result<BackendIr> {
    let enum_registry = EnumRegistry::from_records(records);
    let mut collector = Collector::new();
    let mut ir = BackendIr::default();

    for record in records {
        for decl in &record.declarations {
            match &decl.detail {
                DeclarationDetail::Enum { members } => {
                    ir.enums.insert(
                        decl.name.clone(),
                        EnumDecl {
                            name: decl.name.clone(),
                            values: members
                                .iter()
                                .map(|m| (m.name.clone(), m.value.clone()))
                                .collect(),
                        },
                    );
                }
                DeclarationDetail::TypeAlias {
                    string_union: Some(members),
                    ..
                } => {
                    ir.enums.insert(
                        decl.name.clone(),
                        EnumDecl {
                            name: decl.name.clone(),
                            values: members
                                .iter()
                                .map(|m| (constant_case(m), Some(m.clone())))
                                .collect(),
                        },
                    );
                }
                _ => {}
            }
        }
    }

    for spec in specs {
        let mut fields = Vec::with_capacity(spec.fields.len());
        let mut gql_fields = Vec::with_capacity(spec.fields.len());

        for field in &spec.fields {
            match type_mapper::map_field(target, &spec.node_type, field, &enum_registry, overrides) {
                Ok(mapped) => {
                    if field.field_type == "enum" && !ir.enums.contains_key(&mapped.lang_type) {
                        let allowed = field
                            .validation
                            .as_ref()
                            .and_then(|v| v.allowed_values.as_ref());
                        let values = allowed
                            .map(|values| {
                                values
                                    .iter()
                                    .map(|v| {
                                        let text = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                                        (constant_case(&text), Some(text))
                                    })
                                    .collect()
                            })
                            .unwrap_or_default();
                        ir.enums.insert(
                            mapped.lang_type.clone(),
                            EnumDecl {
                                name: mapped.lang_type.clone(),
                                values,
                            },
                        );
                    }

                    fields.push(ModelField {
                        name: field.name.clone(),
                        lang_type: mapped.lang_type.clone(),
                        gql_type: mapped.gql_type.clone(),
                        required: field.required,
                        default_value: field.default_value.clone(),
                        default_literal: mapped.default_literal.clone(),
                    });
                    gql_fields.push((field.name.clone(), mapped.gql_type));
                }
                Err(err) => collector.extend_from(err),
            }
        }

        ir.models.insert(
            spec.node_type.clone(),
            DataModel {
                node_type: spec.node_type.clone(),
                fields,
            },
        );
        ir.graphql_types.insert(
            spec.node_type.clone(),
            GraphqlTypeDecl {
                name: spec.node_type.clone(),
                fields: gql_fields,
            },
        );

        if let Some(meta) = &spec.handler_metadata {
            ir.handler_stubs.insert(
                spec.node_type.clone(),
                HandlerStub {
                    node_type: spec.node_type.clone(),
                    module_path: meta.module_path.clone(),
                    class_name: meta.class_name.clone(),
                    emit_file: !meta.skip_generation,
                },
            );
        }
    }

    for query in queries {
        for op in &query.operations {
            ir.operations.push(OperationDecl {
                entity_name: query.entity_name.clone(),
                name: op.name.clone(),
                kind: match op.kind {
                    OperationKind::Query => OperationVariant::Query,
                    OperationKind::Mutation => OperationVariant::Mutation,
                    OperationKind::Subscription => OperationVariant::Subscription,
                },
            });
        }
    }

    collector.finish_with("backend_ir", ir)
}
