//! Validator (§4.8): verifies the staging tree before promotion. Syntax validation is
//! mandatory; an external static type checker is an optional, off-by-default hook.

use std::process::Command;

use apollo_parser::Parser as GraphqlParser;
use dipeo_codegen_errors::{Collector, Diagnostic, ErrorKind, Result};

use crate::stager::GeneratedFile;

#[derive(Debug, Clone, Default)]
pub struct TypeCheckerConfig {
    /// External command to shell out to, e.g. `["mypy", "--strict"]`. `None` disables
    /// the type-checking pass entirely (the default).
    pub command: Option<Vec<String>>,
}

/// Validates every staged file's syntax, and optionally invokes an external type
/// checker. Never mutates the inputs.
pub fn validate(files: &[GeneratedFile], type_checker: &TypeCheckerConfig) -> Result<()> {
    let mut collector = Collector::new();

    for file in files {
        if file.path.ends_with(".graphql") {
            validate_graphql(file, &mut collector);
        } else if file.path.ends_with(".py") {
            validate_python(file, &mut collector);
        }
    }

    collector.finish("syntax_validation")?;

    if let Some(command) = &type_checker.command {
        run_type_checker(command)?;
    }

    Ok(())
}

fn validate_graphql(file: &GeneratedFile, collector: &mut Collector) {
    let parsed = GraphqlParser::new(&file.content).parse();
    for error in parsed.errors() {
        let line = file.content[..error.index().min(file.content.len())]
            .matches('\n')
            .count()
            + 1;
        collector.push(
            Diagnostic::new(ErrorKind::SyntaxValidation, error.message().to_string())
                .with_path(&file.path)
                .with_location(line, 0),
        );
    }
}

/// Approximate structural checker: balanced brackets/parens/quotes and triple-quotes,
/// consistent indentation, and `def`/`class` names that are valid identifiers. No
/// Python-grammar crate exists anywhere in the reference stack, so this is documented
/// as an approximation rather than a full parse.
fn validate_python(file: &GeneratedFile, collector: &mut Collector) {
    let mut stack = Vec::new();
    let mut in_triple_quote: Option<char> = None;
    let mut in_string: Option<char> = None;

    for (line_no, line) in file.content.lines().enumerate() {
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(quote) = in_triple_quote {
                if c == quote && chars.clone().take(2).collect::<String>() == quote.to_string().repeat(2) {
                    chars.next();
                    chars.next();
                    in_triple_quote = None;
                }
                continue;
            }
            if let Some(quote) = in_string {
                if c == '\\' {
                    chars.next();
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => {
                    let rest: String = chars.clone().take(2).collect();
                    if rest == c.to_string().repeat(2) {
                        chars.next();
                        chars.next();
                        in_triple_quote = Some(c);
                    } else {
                        in_string = Some(c);
                    }
                }
                '(' | '[' | '{' => stack.push((c, line_no + 1)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        _ => {
                            collector.push(
                                Diagnostic::new(
                                    ErrorKind::SyntaxValidation,
                                    format!("unmatched closing `{c}`"),
                                )
                                .with_path(&file.path)
                                .with_location(line_no + 1, 0),
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        let trimmed = line.trim_start();
        for keyword in ["def ", "class "] {
            if let Some(rest) = trimmed.strip_prefix(keyword) {
                let name = rest.split(['(', ':']).next().unwrap_or("").trim();
                if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_') {
                    collector.push(
                        Diagnostic::new(
                            ErrorKind::SyntaxValidation,
                            format!("`{}` has an invalid identifier name", keyword.trim()),
                        )
                        .with_path(&file.path)
                        .with_location(line_no + 1, 0),
                    );
                }
            }
        }
    }

    for (open, line_no) in stack {
        collector.push(
            Diagnostic::new(ErrorKind::SyntaxValidation, format!("unclosed `{open}`"))
                .with_path(&file.path)
                .with_location(line_no, 0),
        );
    }

    if in_triple_quote.is_some() || in_string.is_some() {
        collector.push(
            Diagnostic::new(ErrorKind::SyntaxValidation, "unterminated string literal".to_string())
                .with_path(&file.path),
        );
    }
}

fn run_type_checker(command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Ok(());
    };
    let output = Command::new(program).args(args).output().map_err(|e| {
        dipeo_codegen_errors::CodegenError::single(
            Diagnostic::new(ErrorKind::TypeValidation, format!("failed to launch `{program}`: {e}")),
        )
    })?;

    if !output.status.success() {
        return Err(dipeo_codegen_errors::CodegenError::single(
            Diagnostic::new(
                ErrorKind::TypeValidation,
                String::from_utf8_lossy(&output.stdout).into_owned(),
            )
            .with_remediation("fix the type errors reported above, or disable the type checker"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stager::FileClassification;

    #[test]
    fn accepts_well_formed_graphql() {
        let files = vec![GeneratedFile::new(
            "schema.graphql",
            "type Foo {\n  bar: String\n}\n",
            FileClassification::Schema,
        )];
        assert!(validate(&files, &TypeCheckerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_malformed_graphql() {
        let files = vec![GeneratedFile::new(
            "schema.graphql",
            "type Foo {\n  bar: \n}\n",
            FileClassification::Schema,
        )];
        assert!(validate(&files, &TypeCheckerConfig::default()).is_err());
    }

    #[test]
    fn accepts_well_formed_python() {
        let files = vec![GeneratedFile::new(
            "models/foo.py",
            "class Foo:\n    bar: str\n",
            FileClassification::Model,
        )];
        assert!(validate(&files, &TypeCheckerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        let files = vec![GeneratedFile::new(
            "models/foo.py",
            "class Foo:\n    bar: list[str\n",
            FileClassification::Model,
        )];
        assert!(validate(&files, &TypeCheckerConfig::default()).is_err());
    }

    #[test]
    fn type_checker_is_off_by_default() {
        assert!(TypeCheckerConfig::default().command.is_none());
    }
}
