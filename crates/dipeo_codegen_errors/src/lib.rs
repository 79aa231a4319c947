//! Structured error taxonomy shared by every phase of the generation pipeline.
//!
//! Each [`ErrorKind`] corresponds to one entry of the structured error format: a `kind`,
//! an optional source `path`, an optional `line`/`column`, a `message`, and an optional
//! remediation hint. Phases never raise a single error the moment something goes wrong;
//! they collect every failure they can find and raise one [`CodegenError::Aggregate`].

use std::fmt;
use std::path::PathBuf;

/// One category from the structured error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParseError,
    SpecInvariant,
    TypeMapping,
    IrReference,
    TemplateRender,
    SyntaxValidation,
    TypeValidation,
    ApplyFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ParseError => "parse_error",
            Self::SpecInvariant => "spec_invariant",
            Self::TypeMapping => "type_mapping",
            Self::IrReference => "ir_reference",
            Self::TemplateRender => "template_render",
            Self::SyntaxValidation => "syntax_validation",
            Self::TypeValidation => "type_validation",
            Self::ApplyFailure => "apply_failure",
        };
        f.write_str(s)
    }
}

/// A single diagnostic record, independent of how it gets rendered.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub path: Option<PathBuf>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub message: String,
    pub remediation: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: None,
            line: None,
            column: None,
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_remediation(mut self, hint: impl Into<String>) -> Self {
        self.remediation = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.kind)?;
        if let Some(path) = &self.path {
            write!(f, "{}", path.display())?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
                if let Some(col) = self.column {
                    write!(f, ":{col}")?;
                }
            }
            write!(f, ": ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(hint) = &self.remediation {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// The top-level error type returned by every public entry point in the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("{0}")]
    Single(Diagnostic),

    /// Multiple failures collected by a single phase before aborting.
    #[error("{} failure(s) in {phase}", .diagnostics.len())]
    Aggregate {
        phase: &'static str,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodegenError {
    pub fn single(diagnostic: Diagnostic) -> Self {
        Self::Single(diagnostic)
    }

    pub fn aggregate(phase: &'static str, diagnostics: Vec<Diagnostic>) -> Self {
        Self::Aggregate { phase, diagnostics }
    }

    /// Flatten into the list of diagnostics this error represents, for machine-readable
    /// output or for merging into a larger aggregate.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            Self::Single(d) => vec![d],
            Self::Aggregate { diagnostics, .. } => diagnostics,
            Self::Io(e) => vec![Diagnostic::new(ErrorKind::ParseError, e.to_string())],
            Self::Json(e) => vec![Diagnostic::new(ErrorKind::ParseError, e.to_string())],
        }
    }
}

pub type Result<T> = std::result::Result<T, CodegenError>;

/// Collects diagnostics across a phase, then turns them into a single aggregated error.
///
/// Mirrors how the AST Extractor, Spec Loader, IR Builders, and Validator all need to
/// report every offending file/spec in one pass instead of failing on the first.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Folds another phase's error into this collector, so a caller that delegates to
    /// several sub-steps can still report everything in one aggregate.
    pub fn extend_from(&mut self, error: CodegenError) {
        self.diagnostics.extend(error.into_diagnostics());
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `Ok(())` if nothing was collected, or the aggregated error otherwise.
    pub fn finish(self, phase: &'static str) -> Result<()> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(CodegenError::aggregate(phase, self.diagnostics))
        }
    }

    /// Like [`Self::finish`] but returns a value alongside a successful collection.
    pub fn finish_with<T>(self, phase: &'static str, value: T) -> Result<T> {
        if self.diagnostics.is_empty() {
            Ok(value)
        } else {
            Err(CodegenError::aggregate(phase, self.diagnostics))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_passes_through_when_empty() {
        let collector = Collector::new();
        assert!(collector.finish("test").is_ok());
    }

    #[test]
    fn collector_aggregates_multiple_diagnostics() {
        let mut collector = Collector::new();
        collector.push(Diagnostic::new(ErrorKind::ParseError, "bad file a"));
        collector.push(Diagnostic::new(ErrorKind::ParseError, "bad file b"));
        let err = collector.finish("extract").unwrap_err();
        match err {
            CodegenError::Aggregate { phase, diagnostics } => {
                assert_eq!(phase, "extract");
                assert_eq!(diagnostics.len(), 2);
            }
            _ => panic!("expected aggregate"),
        }
    }

    #[test]
    fn diagnostic_display_includes_path_and_location() {
        let d = Diagnostic::new(ErrorKind::SyntaxValidation, "unexpected token")
            .with_path("models/src/foo.ts")
            .with_location(3, 7);
        let rendered = d.to_string();
        assert!(rendered.contains("foo.ts:3:7"));
        assert!(rendered.contains("syntax_validation"));
    }
}
