//! Custom filters the Template Engine exposes to its render functions: thin Type Mapper
//! wrappers, naming transforms (re-exported from [`crate::casing`]), default-value
//! rendering, and docstring wrapping.

use dipeo_codegen_errors::Result;
use serde_json::Value;

pub use crate::casing::{camel_case, kebab_case, pascal_case, pluralize, snake_case};
use crate::config::{OverrideTable, TargetLanguage};
use crate::specs::FieldSpec;
use crate::type_mapper::{self, EnumRegistry};

/// `ts_to_lang` filter: maps a field's TS type to its target-language type.
pub fn ts_to_lang(
    target: TargetLanguage,
    spec_name: &str,
    field: &FieldSpec,
    enums: &EnumRegistry,
    overrides: &OverrideTable,
) -> Result<String> {
    type_mapper::map_field(target, spec_name, field, enums, overrides).map(|m| m.lang_type)
}

/// `ts_to_graphql` filter: maps a field's TS type to its GraphQL type.
pub fn ts_to_graphql(
    target: TargetLanguage,
    spec_name: &str,
    field: &FieldSpec,
    enums: &EnumRegistry,
    overrides: &OverrideTable,
) -> Result<String> {
    type_mapper::map_field(target, spec_name, field, enums, overrides).map(|m| m.gql_type)
}

/// `get_validation_type` filter: the validation-schema fragment for a field.
pub fn get_validation_type(
    target: TargetLanguage,
    spec_name: &str,
    field: &FieldSpec,
    enums: &EnumRegistry,
    overrides: &OverrideTable,
) -> Result<String> {
    type_mapper::map_field(target, spec_name, field, enums, overrides).map(|m| m.validation_fragment)
}

/// `get_graphql_type` filter: formats an already-mapped GraphQL type name, applying the
/// `!`/`[...]` wrapping a schema renderer needs at the point of use (as opposed to
/// `ts_to_graphql`, which derives the type fresh from a field spec).
pub fn get_graphql_type(gql_type: &str, required: bool) -> String {
    if required {
        format!("{gql_type}!")
    } else {
        gql_type.to_string()
    }
}

/// Renders a syntactically-correct Python default expression for a field, using
/// `field(default_factory=...)` for mutable container defaults.
pub fn default_value_expr(lang_type: &str, default_value: Option<&Value>) -> Option<String> {
    let value = default_value?;
    if lang_type.starts_with("list[") {
        return Some(format!("field(default_factory=lambda: {})", python_literal(value)));
    }
    if lang_type == "dict[str, Any]" {
        return Some(format!("field(default_factory=lambda: {})", python_literal(value)));
    }
    Some(python_literal(value))
}

fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(b) => if *b { "True".to_string() } else { "False".to_string() },
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(items) => {
            let rendered = items.iter().map(python_literal).collect::<Vec<_>>().join(", ");
            format!("[{rendered}]")
        }
        Value::Object(map) => {
            let rendered = map
                .iter()
                .map(|(k, v)| format!("{k:?}: {}", python_literal(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{rendered}}}")
        }
    }
}

/// Wraps `text` into docstring/JSDoc lines no wider than `width` columns.
pub fn wrap_doc(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutable_defaults_use_a_factory() {
        let rendered = default_value_expr("list[str]", Some(&Value::Array(vec![]))).unwrap();
        assert!(rendered.starts_with("field(default_factory="));
    }

    #[test]
    fn scalar_defaults_render_directly() {
        let rendered = default_value_expr("str", Some(&Value::String("GET".to_string()))).unwrap();
        assert_eq!(rendered, "\"GET\"");
    }

    #[test]
    fn missing_default_is_none() {
        assert_eq!(default_value_expr("str", None), None);
    }

    #[test]
    fn wraps_long_text_at_width() {
        let lines = wrap_doc("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.len() <= 10 || !l.contains(' ')));
        assert!(lines.len() > 1);
    }

    #[test]
    fn get_graphql_type_wraps_required() {
        assert_eq!(get_graphql_type("String", true), "String!");
        assert_eq!(get_graphql_type("String", false), "String");
    }
}
