//! Spec Loader: discovers and validates Node Specifications and Query Specifications.

mod invariants;
mod loader;
mod model;

pub use loader::{load_node_specs, load_query_specs};
pub use model::{
    Conditional, ExecutionConfig, FieldSpec, HandleConfig, HandlerMetadata, InputPort, NodeSpec,
    OperationKind, OperationSpec, OperationVariable, OutputSpec, QuerySpec, Selection, UiConfig,
    ValidationRules,
};
