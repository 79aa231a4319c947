//! # dipeo_codegen_ts
//!
//! The AST Extractor: turns TypeScript source files into language-neutral
//! [`ast::AstRecord`]s using the `oxc` parser, in-process (no subprocess boundary).

pub mod ast;
mod jsdoc;
pub mod literal;
mod visitor;

use std::fs;
use std::path::{Path, PathBuf};

use dipeo_codegen_errors::{CodegenError, Diagnostic, ErrorKind, Result};
use oxc::allocator::Allocator;
use oxc::parser::Parser;
use oxc::span::SourceType;

pub use ast::AstRecord;
pub use literal::{extract_literals, extract_literals_source};

/// Parses a single TypeScript source file into an [`AstRecord`].
///
/// A parse error is reported as a `parse_error` diagnostic naming the offending file;
/// it never partially returns declarations for a broken file.
pub fn extract_file(path: &Path) -> Result<AstRecord> {
    let source_text = fs::read_to_string(path)?;
    extract_source(path, &source_text)
}

/// Parses TypeScript source text already held in memory (used by the AST Cache to
/// avoid a second disk read, and by tests).
pub fn extract_source(path: &Path, source_text: &str) -> Result<AstRecord> {
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

    Ok(visitor::extract(
        source_text,
        &parser_return.program,
        path.to_path_buf(),
    ))
}

/// Parses every path, failing the whole run on the first file that cannot be parsed
/// aggregated across all files (per §4.1: "a parse error fails the entire run; partial
/// ASTs are never emitted").
pub fn extract_all(paths: &[PathBuf]) -> Result<Vec<AstRecord>> {
    let mut records = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();

    for path in paths {
        match extract_file(path) {
            Ok(record) => records.push(record),
            Err(err) => diagnostics.extend(err.into_diagnostics()),
        }
    }

    if diagnostics.is_empty() {
        Ok(records)
    } else {
        Err(CodegenError::aggregate("ast_extraction", diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_an_exported_interface() {
        let source = "export interface Point {\n  x: number;\n  y: number;\n}\n";
        let record = extract_source(Path::new("point.ts"), source).unwrap();
        assert_eq!(record.declarations.len(), 1);
        let decl = &record.declarations[0];
        assert_eq!(decl.name, "Point");
        assert!(decl.exported);
        match &decl.detail {
            ast::DeclarationDetail::Interface { properties, .. } => {
                assert_eq!(properties.len(), 2);
                assert_eq!(properties[0].name, "x");
                assert_eq!(properties[0].type_text, "number");
            }
            _ => panic!("expected interface"),
        }
    }

    #[test]
    fn extracts_enum_members_in_order() {
        let source = "export enum Method {\n  Get = \"GET\",\n  Post = \"POST\",\n}\n";
        let record = extract_source(Path::new("method.ts"), source).unwrap();
        let decl = &record.declarations[0];
        match &decl.detail {
            ast::DeclarationDetail::Enum { members } => {
                assert_eq!(members.len(), 2);
                assert_eq!(members[0].name, "Get");
                assert_eq!(members[0].value.as_deref(), Some("GET"));
            }
            _ => panic!("expected enum"),
        }
    }

    #[test]
    fn non_exported_declarations_are_kept_but_marked() {
        let source = "interface Internal {\n  value: string;\n}\n";
        let record = extract_source(Path::new("internal.ts"), source).unwrap();
        assert_eq!(record.declarations.len(), 1);
        assert!(!record.declarations[0].exported);
    }

    #[test]
    fn jsdoc_attaches_to_nearest_declaration() {
        let source = "/**\n * A point in space.\n */\nexport interface Point {\n  x: number;\n}\n";
        let record = extract_source(Path::new("point.ts"), source).unwrap();
        assert_eq!(record.declarations[0].doc.as_deref(), Some("A point in space."));
    }

    #[test]
    fn preserves_declaration_order() {
        let source = "export interface A {}\nexport interface B {}\nexport interface C {}\n";
        let record = extract_source(Path::new("multi.ts"), source).unwrap();
        let names: Vec<&str> = record.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn type_text_is_preserved_verbatim() {
        let source = "export interface Req {\n  value: string | null;\n}\n";
        let record = extract_source(Path::new("req.ts"), source).unwrap();
        match &record.declarations[0].detail {
            ast::DeclarationDetail::Interface { properties, .. } => {
                assert_eq!(properties[0].type_text, "string | null");
            }
            _ => panic!("expected interface"),
        }
    }
}
