//! Evaluates the object/array literal initializer of a top-level `export const`, so the
//! Spec Loader can read Node/Query Specifications authored as plain TS object literals
//! (`export const httpRequestSpec = { ... } satisfies NodeSpecification;`) without a full
//! JS evaluator. Only literal forms are supported — anything computed (spread, function
//! calls, template substitutions) is left out rather than guessed at.

use oxc::allocator::Allocator;
use oxc::ast::ast::{self, BindingPatternKind, Expression, PropertyKey, Statement};
use oxc::parser::Parser;
use oxc::span::{GetSpan, SourceType};
use serde_json::{Map, Value};

use dipeo_codegen_errors::{CodegenError, Diagnostic, ErrorKind, Result};

/// Every top-level `export const NAME = <literal>;` in a file, in source order.
/// Declarations whose initializer is not a supported literal form are skipped.
pub fn extract_literals(path: &std::path::Path) -> Result<Vec<(String, Value)>> {
    let source_text = std::fs::read_to_string(path)?;
    extract_literals_source(path, &source_text)
}

pub fn extract_literals_source(path: &std::path::Path, source_text: &str) -> Result<Vec<(String, Value)>> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_default();
    let parser_return = Parser::new(&allocator, source_text, source_type).parse();

    if !parser_return.errors.is_empty() {
        let message = parser_return
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CodegenError::single(
            Diagnostic::new(ErrorKind::ParseError, message).with_path(path),
        ));
    }

    let mut out = Vec::new();
    for stmt in &parser_return.program.body {
        let Statement::ExportNamedDeclaration(export) = stmt else {
            continue;
        };
        let Some(ast::Declaration::VariableDeclaration(var_decl)) = &export.declaration else {
            continue;
        };
        for declarator in &var_decl.declarations {
            let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                continue;
            };
            let Some(init) = &declarator.init else { continue };
            if let Some(value) = eval_expression(init) {
                out.push((id.name.to_string(), value));
            }
        }
    }
    Ok(out)
}

fn eval_expression(expr: &Expression<'_>) -> Option<Value> {
    match expr {
        Expression::StringLiteral(s) => Some(Value::String(s.value.to_string())),
        Expression::NumericLiteral(n) => {
            serde_json::Number::from_f64(n.value).map(Value::Number)
        }
        Expression::BooleanLiteral(b) => Some(Value::Bool(b.value)),
        Expression::NullLiteral(_) => Some(Value::Null),
        Expression::TemplateLiteral(t) if t.expressions.is_empty() => {
            let text = t
                .quasis
                .iter()
                .map(|q| q.value.cooked.as_ref().map(|c| c.to_string()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("");
            Some(Value::String(text))
        }
        Expression::UnaryExpression(u) if u.operator == ast::UnaryOperator::UnaryNegation => {
            let Value::Number(n) = eval_expression(&u.argument)? else {
                return None;
            };
            serde_json::Number::from_f64(-n.as_f64()?).map(Value::Number)
        }
        Expression::ArrayExpression(arr) => {
            let mut items = Vec::new();
            for el in &arr.elements {
                match el {
                    ast::ArrayExpressionElement::SpreadElement(_)
                    | ast::ArrayExpressionElement::Elision(_) => return None,
                    _ => {
                        let e = el.as_expression()?;
                        items.push(eval_expression(e)?);
                    }
                }
            }
            Some(Value::Array(items))
        }
        Expression::ObjectExpression(obj) => {
            let mut map = Map::new();
            for prop in &obj.properties {
                let ast::ObjectPropertyKind::ObjectProperty(p) = prop else {
                    return None;
                };
                let key = property_key_name(&p.key)?;
                map.insert(key, eval_expression(&p.value)?);
            }
            Some(Value::Object(map))
        }
        Expression::TSSatisfiesExpression(s) => eval_expression(&s.expression),
        Expression::TSAsExpression(a) => eval_expression(&a.expression),
        Expression::ParenthesizedExpression(p) => eval_expression(&p.expression),
        _ => None,
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}
