//! The Node Specification / Field Specification / Query Specification data model —
//! the deserialized shape of the object literals authored in `*.spec.ts` and
//! `query-definitions/*.ts` files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub node_type: String,
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    pub primary_display_field: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub handles: HandleConfig,
    #[serde(default)]
    pub input_ports: Vec<InputPort>,
    #[serde(default)]
    pub outputs: IndexMap<String, OutputSpec>,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub handler_metadata: Option<HandlerMetadata>,
    #[serde(default)]
    pub examples: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleConfig {
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPort {
    pub name: String,
    pub content_type: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionConfig {
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub retryable: bool,
    #[serde(default)]
    pub max_retries: Option<u32>,
    #[serde(default)]
    pub required_services: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerMetadata {
    pub module_path: String,
    pub class_name: String,
    #[serde(default)]
    pub mixins: Vec<String>,
    #[serde(default)]
    pub service_keys: Vec<String>,
    #[serde(default)]
    pub skip_generation: bool,
    #[serde(default)]
    pub custom_imports: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: String,
    pub field_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub validation: Option<ValidationRules>,
    #[serde(default)]
    pub ui: Option<UiConfig>,
    #[serde(default)]
    pub nested_fields: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub conditional: Option<Conditional>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min_length: Option<u64>,
    #[serde(default)]
    pub max_length: Option<u64>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub allowed_values: Option<Vec<Value>>,
    #[serde(default)]
    pub item_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    #[serde(default)]
    pub input_widget: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub column: Option<u32>,
    #[serde(default)]
    pub rows: Option<u32>,
    #[serde(default)]
    pub options: Option<Vec<Value>>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub adjustable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub field: String,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    pub entity_name: String,
    pub operations: Vec<OperationSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    pub name: String,
    pub kind: OperationKind,
    #[serde(default)]
    pub variables: Vec<OperationVariable>,
    #[serde(default)]
    pub selection: Vec<Selection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationVariable {
    pub name: String,
    pub gql_type: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Field(String),
    Nested {
        name: String,
        fields: Vec<Selection>,
    },
}
