//! Cross-spec invariant checks (§3): node type uniqueness, field name uniqueness,
//! conditional field references, enum default membership, and primary display field
//! resolution. Every violation is reported; none aborts early.

use std::collections::HashSet;

use dipeo_codegen_errors::{Collector, Diagnostic, ErrorKind, Result};

use super::model::NodeSpec;

pub fn validate_node_specs(specs: &[NodeSpec]) -> Result<()> {
    let mut collector = Collector::new();
    let mut seen_node_types = HashSet::new();

    for spec in specs {
        if !seen_node_types.insert(spec.node_type.clone()) {
            collector.push(Diagnostic::new(
                ErrorKind::SpecInvariant,
                format!("duplicate node type `{}`", spec.node_type),
            ));
        }

        validate_single_spec(spec, &mut collector);
    }

    collector.finish("spec_validation")
}

fn validate_single_spec(spec: &NodeSpec, collector: &mut Collector) {
    let mut seen_fields = HashSet::new();
    for field in &spec.fields {
        if !seen_fields.insert(field.name.clone()) {
            collector.push(Diagnostic::new(
                ErrorKind::SpecInvariant,
                format!(
                    "duplicate field name `{}` in spec `{}`",
                    field.name, spec.node_type
                ),
            ));
        }
    }

    if !seen_fields.contains(&spec.primary_display_field) {
        collector.push(Diagnostic::new(
            ErrorKind::SpecInvariant,
            format!(
                "primaryDisplayField `{}` does not name a field of spec `{}`",
                spec.primary_display_field, spec.node_type
            ),
        ));
    }

    for field in &spec.fields {
        if let Some(conditional) = &field.conditional
            && !seen_fields.contains(&conditional.field)
        {
            collector.push(Diagnostic::new(
                ErrorKind::SpecInvariant,
                format!(
                    "field `{}` in spec `{}` has a conditional referencing unknown sibling field `{}`",
                    field.name, spec.node_type, conditional.field
                ),
            ));
        }

        if field.field_type == "enum"
            && let (Some(default), Some(validation)) = (&field.default_value, &field.validation)
            && let Some(allowed) = &validation.allowed_values
            && !allowed.contains(default)
        {
            collector.push(Diagnostic::new(
                ErrorKind::SpecInvariant,
                format!(
                    "field `{}` in spec `{}` has a default value not present in its allowedValues",
                    field.name, spec.node_type
                ),
            ));
        }

        if let Some(default) = &field.default_value
            && leaks_target_syntax(&field.field_type, default)
        {
            collector.push(Diagnostic::new(
                ErrorKind::SpecInvariant,
                format!(
                    "field `{}` in spec `{}` has a default value of `{default}`, a string that \
                     looks like a non-string literal (boolean/null) for a `{}` field — use the \
                     real JSON type or an override, not a quoted placeholder",
                    field.name, spec.node_type, field.field_type
                ),
            ));
        }
    }
}

/// Catches the "string literal defaults leaking target-language syntax" case: a
/// boolean/number field whose default arrived as a quoted string (`"false"`,
/// `"True"`, `"null"`) rather than the real JSON type. Rendered naively this becomes
/// a non-empty Python string literal instead of `False`/`None` — always truthy.
fn leaks_target_syntax(field_type: &str, default: &serde_json::Value) -> bool {
    let Some(text) = default.as_str() else {
        return false;
    };
    match field_type {
        "boolean" => matches!(text, "true" | "True" | "false" | "False"),
        "number" | "integer" => text.parse::<f64>().is_ok(),
        _ => matches!(text, "null" | "None" | "undefined"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::specs::model::{ExecutionConfig, FieldSpec, HandleConfig};
    use indexmap::IndexMap;

    fn minimal_spec(node_type: &str) -> NodeSpec {
        NodeSpec {
            node_type: node_type.to_string(),
            display_name: node_type.to_string(),
            category: String::new(),
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
    fn accepts_a_well_formed_spec() {
        let spec = minimal_spec("http_request");
        assert!(validate_node_specs(&[spec]).is_ok());
    }

    #[test]
    fn rejects_duplicate_node_types() {
        let err = validate_node_specs(&[minimal_spec("http_request"), minimal_spec("http_request")])
            .unwrap_err();
        assert_eq!(err.into_diagnostics().len(), 1);
    }

    #[test]
    fn rejects_primary_display_field_naming_nothing() {
        let mut spec = minimal_spec("http_request");
        spec.primary_display_field = "missing".to_string();
        assert!(validate_node_specs(&[spec]).is_err());
    }

    #[test]
    fn rejects_enum_default_outside_allowed_values() {
        let mut spec = minimal_spec("http_request");
        spec.fields[0].field_type = "enum".to_string();
        spec.fields[0].default_value = Some(json!("DELETE"));
        spec.fields[0].validation = Some(crate::specs::model::ValidationRules {
            allowed_values: Some(vec![json!("GET"), json!("POST")]),
            ..Default::default()
        });
        assert!(validate_node_specs(&[spec]).is_err());
    }

    #[test]
    fn rejects_quoted_boolean_default_on_a_boolean_field() {
        let mut spec = minimal_spec("http_request");
        spec.fields[0].field_type = "boolean".to_string();
        spec.fields[0].default_value = Some(json!("False"));
        assert!(validate_node_specs(&[spec]).is_err());
    }

    #[test]
    fn accepts_a_real_boolean_default_on_a_boolean_field() {
        let mut spec = minimal_spec("http_request");
        spec.fields[0].field_type = "boolean".to_string();
        spec.fields[0].default_value = Some(json!(false));
        assert!(validate_node_specs(&[spec]).is_ok());
    }
}
