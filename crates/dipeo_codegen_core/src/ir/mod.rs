//! The three IR Builders (§4.5): Backend, Frontend, and Schema. Each consumes AST
//! Records and/or specs plus the Type Mapper and produces a pure, serializable tree.

pub mod backend;
pub mod frontend;
pub mod schema;

pub use backend::BackendIr;
pub use frontend::FrontendIr;
pub use schema::SchemaIr;

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
    fn backend_ir_emits_one_model_per_spec() {
        let ir = backend::build(
            &[spec()],
            &[],
            &[],
            TargetLanguage::Python,
            &OverrideTable::default(),
        )
        .unwrap();
        assert!(ir.models.contains_key("http_request"));
        assert_eq!(ir.models["http_request"].fields[0].lang_type, "str");
    }

    #[test]
    fn enum_field_synthesizes_a_matching_enum_decl() {
        let mut enum_field = spec();
        enum_field.fields.push(FieldSpec {
            name: "method".to_string(),
            field_type: "enum".to_string(),
            required: true,
            default_value: None,
            description: String::new(),
            validation: Some(crate::specs::ValidationRules {
                allowed_values: Some(vec![serde_json::json!("GET"), serde_json::json!("POST")]),
                ..Default::default()
            }),
            ui: None,
            nested_fields: None,
            conditional: None,
        });

        let backend = backend::build(
            &[enum_field],
            &[],
            &[],
            TargetLanguage::Python,
            &OverrideTable::default(),
        )
        .unwrap();

        let method_type = &backend.models["http_request"].fields[1].lang_type;
        assert!(backend.enums.contains_key(method_type));
        let values: Vec<_> = backend.enums[method_type]
            .values
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(values, vec!["GET", "POST"]);
    }

    #[test]
    fn schema_ir_merges_backend_types() {
        let backend = backend::build(
            &[spec()],
            &[],
            &[],
            TargetLanguage::Python,
            &OverrideTable::default(),
        )
        .unwrap();
        let frontend = frontend::build(
            &[spec()],
            &[],
            &EnumRegistry::default(),
            TargetLanguage::Python,
            &OverrideTable::default(),
        )
        .unwrap();
        let schema = schema::build(&backend, &frontend).unwrap();
        assert!(schema.types.contains_key("http_request"));
    }
}
