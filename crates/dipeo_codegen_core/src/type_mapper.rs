//! Translates TS types and field specifications into target-language types, GraphQL
//! types, and validation schema fragments (§4.4). Pure: `(type_text | field_spec,
//! enum_registry, overrides) -> (lang_type, gql_type, validation_fragment)`.

use std::collections::HashSet;

use dipeo_codegen_errors::{CodegenError, Diagnostic, ErrorKind, Result};
use dipeo_codegen_ts::ast::{AstRecord, DeclarationDetail};

use crate::casing::pascal_case;
use crate::config::{OverrideTable, TargetLanguage};
use crate::specs::FieldSpec;

/// Every TS enum name and string-union-alias name discovered across all AST records,
/// used to resolve branded/custom field types to a concrete enum reference.
#[derive(Debug, Default, Clone)]
pub struct EnumRegistry {
    names: HashSet<String>,
}

impl EnumRegistry {
    pub fn from_records(records: &[AstRecord]) -> Self {
        let mut names = HashSet::new();
        for record in records {
            for decl in &record.declarations {
                match &decl.detail {
                    DeclarationDetail::Enum { .. } => {
                        names.insert(decl.name.clone());
                    }
                    DeclarationDetail::TypeAlias {
                        string_union: Some(_),
                        ..
                    } => {
                        names.insert(decl.name.clone());
                    }
                    _ => {}
                }
            }
        }
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

/// The result of mapping one field: its target-language type, its GraphQL type, and a
/// validation-schema fragment expressing its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedField {
    pub lang_type: String,
    pub gql_type: String,
    pub validation_fragment: String,
    /// A `targetDefault` override, rendered verbatim in place of the spec's JSON
    /// default — the only way to express a default the JSON type system can't, e.g.
    /// a factory call or a reference to another constant.
    pub default_literal: Option<String>,
}

pub fn map_field(
    target: TargetLanguage,
    spec_name: &str,
    field: &FieldSpec,
    enums: &EnumRegistry,
    overrides: &OverrideTable,
) -> Result<MappedField> {
    let TargetLanguage::Python = target;

    let (mut lang_type, mut gql_type) = base_types(spec_name, field, enums)?;

    if !field.required {
        lang_type = format!("Optional[{lang_type}]");
    }

    let validation_fragment = validation_fragment(field);
    let mut default_literal = None;

    if let Some(o) = overrides.lookup(spec_name, &field.name) {
        if let Some(t) = &o.target_type {
            lang_type = t.clone();
        }
        if let Some(g) = &o.gql_type {
            gql_type = g.clone();
        }
        if let Some(d) = &o.target_default {
            default_literal = Some(d.clone());
        }
    }

    Ok(MappedField {
        lang_type,
        gql_type,
        validation_fragment,
        default_literal,
    })
}

fn base_types(spec_name: &str, field: &FieldSpec, enums: &EnumRegistry) -> Result<(String, String)> {
    Ok(match field.field_type.as_str() {
        "string" => ("str".to_string(), "String".to_string()),
        "number" => ("float".to_string(), "Float".to_string()),
        "boolean" => ("bool".to_string(), "Boolean".to_string()),
        "PersonID" => ("PersonID".to_string(), "PersonID".to_string()),
        "enum" => {
            let enum_name = format!("{}{}", pascal_case(spec_name), pascal_case(&field.name));
            (enum_name.clone(), enum_name)
        }
        "object" => ("dict[str, Any]".to_string(), "JSON".to_string()),
        "array" => {
            let item_type = field
                .validation
                .as_ref()
                .and_then(|v| v.item_type.as_deref())
                .unwrap_or("string");
            let (item_lang, item_gql) = base_types(
                spec_name,
                &FieldSpec {
                    name: field.name.clone(),
                    field_type: item_type.to_string(),
                    required: true,
                    default_value: None,
                    description: String::new(),
                    validation: None,
                    ui: None,
                    nested_fields: None,
                    conditional: None,
                },
                enums,
            )?;
            (format!("list[{item_lang}]"), format!("[{item_gql}]"))
        }
        branded if enums.contains(branded) => (branded.to_string(), branded.to_string()),
        branded => {
            return Err(CodegenError::single(
                Diagnostic::new(
                    ErrorKind::TypeMapping,
                    format!(
                        "spec `{spec_name}` field `{}` has unresolvable type `{branded}` \
                         (not a primitive, not a known enum, no override provided)",
                        field.name
                    ),
                )
                .with_remediation(format!(
                    "add an override for (\"{spec_name}\", \"{}\") or declare `{branded}` as a TS enum",
                    field.name
                )),
            ));
        }
    })
}

fn validation_fragment(field: &FieldSpec) -> String {
    let mut parts = vec![match field.field_type.as_str() {
        "string" => "z.string()".to_string(),
        "number" => "z.number()".to_string(),
        "boolean" => "z.boolean()".to_string(),
        "array" => "z.array(z.unknown())".to_string(),
        "enum" => "z.enum([])".to_string(),
        other => format!("z.custom<{other}>()"),
    }];

    if let Some(v) = &field.validation {
        if let Some(min) = v.min {
            parts.push(format!(".min({min})"));
        }
        if let Some(max) = v.max {
            parts.push(format!(".max({max})"));
        }
        if let Some(min_len) = v.min_length {
            parts.push(format!(".min({min_len})"));
        }
        if let Some(max_len) = v.max_length {
            parts.push(format!(".max({max_len})"));
        }
        if let Some(pattern) = &v.pattern {
            parts.push(format!(".regex(/{pattern}/)"));
        }
        if let Some(allowed) = &v.allowed_values {
            let values = allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return format!("z.enum([{values}])");
        }
    }

    if !field.required {
        parts.push(".optional()".to_string());
    }

    parts.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldOverride;
    use crate::specs::ValidationRules;
    use serde_json::json;

    fn field(name: &str, field_type: &str, required: bool) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            field_type: field_type.to_string(),
            required,
            default_value: None,
            description: String::new(),
            validation: None,
            ui: None,
            nested_fields: None,
            conditional: None,
        }
    }

    #[test]
    fn maps_required_string() {
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("url", "string", true),
            &EnumRegistry::default(),
            &OverrideTable::default(),
        )
        .unwrap();
        assert_eq!(mapped.lang_type, "str");
        assert_eq!(mapped.gql_type, "String");
    }

    #[test]
    fn optional_fields_are_wrapped() {
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("timeout", "number", false),
            &EnumRegistry::default(),
            &OverrideTable::default(),
        )
        .unwrap();
        assert_eq!(mapped.lang_type, "Optional[float]");
    }

    #[test]
    fn array_of_string_maps_to_list() {
        let mut f = field("headers", "array", true);
        f.validation = Some(ValidationRules {
            item_type: Some("string".to_string()),
            ..Default::default()
        });
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &f,
            &EnumRegistry::default(),
            &OverrideTable::default(),
        )
        .unwrap();
        assert_eq!(mapped.lang_type, "list[str]");
    }

    #[test]
    fn unresolved_branded_type_without_enum_or_override_fails() {
        let err = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("method", "HttpMethod", true),
            &EnumRegistry::default(),
            &OverrideTable::default(),
        )
        .unwrap_err();
        assert!(matches!(err.into_diagnostics()[0].kind, ErrorKind::TypeMapping));
    }

    #[test]
    fn override_table_wins_over_computed_type() {
        let overrides = OverrideTable::from(vec![FieldOverride {
            spec_name: "http_request".to_string(),
            field_name: "method".to_string(),
            target_default: None,
            target_type: Some("HttpMethod".to_string()),
            gql_type: Some("HttpMethod".to_string()),
        }]);
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("method", "HttpMethod", true),
            &EnumRegistry::default(),
            &overrides,
        )
        .unwrap();
        assert_eq!(mapped.lang_type, "HttpMethod");
    }

    #[test]
    fn target_default_override_is_carried_verbatim() {
        let overrides = OverrideTable::from(vec![FieldOverride {
            spec_name: "http_request".to_string(),
            field_name: "method".to_string(),
            target_default: Some("HttpMethod.GET".to_string()),
            target_type: Some("HttpMethod".to_string()),
            gql_type: None,
        }]);
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("method", "HttpMethod", true),
            &EnumRegistry::default(),
            &overrides,
        )
        .unwrap();
        assert_eq!(mapped.default_literal.as_deref(), Some("HttpMethod.GET"));
    }

    #[test]
    fn no_override_leaves_default_literal_unset() {
        let mapped = map_field(
            TargetLanguage::Python,
            "http_request",
            &field("url", "string", true),
            &EnumRegistry::default(),
            &OverrideTable::default(),
        )
        .unwrap();
        assert_eq!(mapped.default_literal, None);
    }

    #[test]
    fn allowed_values_become_a_zod_enum() {
        let mut f = field("method", "enum", true);
        f.validation = Some(ValidationRules {
            allowed_values: Some(vec![json!("GET"), json!("POST")]),
            ..Default::default()
        });
        assert_eq!(validation_fragment(&f), "z.enum([\"GET\", \"POST\"])");
    }
}
