//! The AST Record data model: a language-neutral, JSON-serializable representation of
//! one TypeScript source file's top-level declarations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One TypeScript source file, reduced to its ordered top-level declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstRecord {
    pub path: PathBuf,
    /// Declarations in textual source order.
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Interface,
    TypeAlias,
    Enum,
    Class,
    Function,
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// JSDoc block attached to this declaration, without the `/** */` fence.
    pub doc: Option<String>,
    pub exported: bool,
    pub detail: DeclarationDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationDetail {
    Interface {
        properties: Vec<Property>,
        extends: Vec<String>,
    },
    TypeAlias {
        /// The right-hand side, verbatim.
        type_text: String,
        /// Populated when the alias is a union of string literals, e.g.
        /// `type Method = "GET" | "POST"`.
        string_union: Option<Vec<String>>,
    },
    Enum {
        members: Vec<EnumMember>,
    },
    Class {
        properties: Vec<Property>,
        methods: Vec<Method>,
    },
    FunctionOrConstant {
        /// The parameter/return signature, or the inferred type of a constant, verbatim.
        type_text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub type_text: String,
    pub optional: bool,
    pub readonly: bool,
    pub jsdoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    /// The literal initializer, preserved verbatim (string members keep their quotes
    /// stripped, numeric members keep their textual form).
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type_text: Option<String>,
    pub is_async: bool,
    pub jsdoc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_text: Option<String>,
    pub optional: bool,
    pub default_value: Option<String>,
}
