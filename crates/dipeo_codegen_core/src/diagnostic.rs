//! Diagnostic rendering for errors and warnings.
//!
//! Every `Diagnostic` produced anywhere in the pipeline renders through this
//! module for consistent, Rust-compiler-style output with optional ANSI color.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use dipeo_codegen_errors::{CodegenError, Diagnostic as SourceDiagnostic};

// ── ANSI style helpers ──────────────────────────────────────────────────────

/// Resolved ANSI escape sequences (empty strings when color is disabled).
pub(crate) struct Styles {
    bold: &'static str,
    red: &'static str,
    yellow: &'static str,
    cyan: &'static str,
    dim: &'static str,
    reset: &'static str,
}

const COLORED: Styles = Styles {
    bold: "\x1b[1m",
    red: "\x1b[31m",
    yellow: "\x1b[33m",
    cyan: "\x1b[36m",
    dim: "\x1b[2m",
    reset: "\x1b[0m",
};

const PLAIN: Styles = Styles {
    bold: "",
    red: "",
    yellow: "",
    cyan: "",
    dim: "",
    reset: "",
};

/// Whether to color diagnostic output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    Always,
    Never,
    #[default]
    Auto,
}

fn styles_for(choice: ColorChoice) -> &'static Styles {
    match choice {
        ColorChoice::Never => &PLAIN,
        ColorChoice::Always => &COLORED,
        ColorChoice::Auto => {
            if io::stderr().is_terminal() {
                &COLORED
            } else {
                &PLAIN
            }
        }
    }
}

// ── Core types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Severity {
    Error,
    Warning,
}

/// Source location snippet for rich diagnostic display.
pub struct Snippet<'a> {
    pub file: &'a Path,
    pub source: &'a str,
    pub line: usize,   // 1-based
    pub column: usize, // 1-based
}

/// A renderable diagnostic with an optional source snippet.
pub struct Rendered<'a> {
    pub severity: Severity,
    pub kind: &'a str,
    pub message: &'a str,
    pub remediation: Option<&'a str>,
    pub snippet: Option<Snippet<'a>>,
}

fn digit_count(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    let mut count = 0;
    let mut val = n;
    while val > 0 {
        count += 1;
        val /= 10;
    }
    count
}

fn render_source_line(
    w: &mut dyn io::Write,
    line_num: usize,
    text: &str,
    gutter_width: usize,
    s: &Styles,
) -> io::Result<()> {
    writeln!(
        w,
        "  {dim}{num:>width$} │{reset} {text}",
        dim = s.dim,
        num = line_num,
        width = gutter_width,
        reset = s.reset,
    )
}

impl Rendered<'_> {
    /// Render this diagnostic to a writer in Rust-compiler style.
    ///
    /// **Without snippet:**
    /// ```text
    /// [type_mapping]: unmapped TS type `Foo`
    /// ```
    ///
    /// **With snippet:**
    /// ```text
    /// [parse_error]: unexpected token
    ///
    ///  models/src/a.ts:2:5
    ///   1 │ export interface Foo {
    ///   2 │     bar?: ;
    ///     │         ^
    ///   3 │ }
    /// ```
    pub(crate) fn render(&self, w: &mut dyn io::Write, s: &Styles) -> io::Result<()> {
        let (label, color) = match self.severity {
            Severity::Error => ("Error", s.red),
            Severity::Warning => ("Warning", s.yellow),
        };
        writeln!(
            w,
            "{color}{bold}[{label}/{kind}]: {message}{reset}",
            bold = s.bold,
            kind = self.kind,
            message = self.message,
            reset = s.reset,
        )?;

        if let Some(snippet) = &self.snippet {
            writeln!(w)?;
            writeln!(
                w,
                " {cyan}{file}:{line}:{col}{reset}",
                cyan = s.cyan,
                file = snippet.file.display(),
                line = snippet.line,
                col = snippet.column,
                reset = s.reset,
            )?;

            let lines: Vec<&str> = snippet.source.lines().collect();
            let line_idx = snippet.line.saturating_sub(1);
            let max_line_shown = (snippet.line + 1).min(lines.len());
            let gutter = digit_count(max_line_shown);

            if snippet.line >= 2
                && let Some(prev) = lines.get(line_idx.wrapping_sub(1))
            {
                render_source_line(w, snippet.line - 1, prev, gutter, s)?;
            }
            if let Some(current) = lines.get(line_idx) {
                render_source_line(w, snippet.line, current, gutter, s)?;
            }

            write!(
                w,
                "  {dim}{0:>gutter$} │{reset} {0:>col$}{color}{bold}^",
                "",
                dim = s.dim,
                gutter = gutter,
                reset = s.reset,
                col = snippet.column.saturating_sub(1),
                color = color,
                bold = s.bold,
            )?;
            writeln!(w, "{reset}", reset = s.reset)?;

            if let Some(next) = lines.get(line_idx + 1) {
                render_source_line(w, snippet.line + 1, next, gutter, s)?;
            }
            writeln!(w)?;
        }

        if let Some(hint) = self.remediation {
            writeln!(w, "  {dim}hint:{reset} {hint}", dim = s.dim, reset = s.reset)?;
        }

        Ok(())
    }
}

fn snippet_for<'a>(diag: &'a SourceDiagnostic, source_cache: &'a str) -> Option<Snippet<'a>> {
    let path = diag.path.as_deref()?;
    let line = diag.line?;
    let column = diag.column?;
    Some(Snippet {
        file: path,
        source: source_cache,
        line,
        column,
    })
}

/// Render one diagnostic, re-reading its source file from disk to build a snippet
/// if it carries a line/column location. Missing or unreadable files degrade to
/// message-only output rather than failing.
pub fn render_diagnostic(
    diag: &SourceDiagnostic,
    severity: Severity,
    color: ColorChoice,
    w: &mut dyn io::Write,
) -> io::Result<()> {
    let s = styles_for(color);
    let source_text = diag
        .path
        .as_deref()
        .and_then(|p| fs::read_to_string(p).ok())
        .unwrap_or_default();

    Rendered {
        severity,
        kind: &diag.kind.to_string(),
        message: &diag.message,
        remediation: diag.remediation.as_deref(),
        snippet: snippet_for(diag, &source_text),
    }
    .render(w, s)
}

/// Render every diagnostic carried by a [`CodegenError`].
pub fn render_error(err: &CodegenError, color: ColorChoice, w: &mut dyn io::Write) -> io::Result<()> {
    match err {
        CodegenError::Single(diag) => render_diagnostic(diag, Severity::Error, color, w),
        CodegenError::Aggregate { diagnostics, .. } => {
            for diag in diagnostics {
                render_diagnostic(diag, Severity::Error, color, w)?;
            }
            Ok(())
        }
        other => {
            let s = styles_for(color);
            let msg = other.to_string();
            Rendered {
                severity: Severity::Error,
                kind: "io",
                message: &msg,
                remediation: None,
                snippet: None,
            }
            .render(w, s)
        }
    }
}

#[cfg(test)]
mod tests {
    use dipeo_codegen_errors::ErrorKind;

    use super::*;

    #[test]
    fn renders_message_only_without_snippet() {
        let diag = SourceDiagnostic::new(ErrorKind::TypeMapping, "unmapped TS type `Foo`");
        let mut buf = Vec::new();
        render_diagnostic(&diag, Severity::Error, ColorChoice::Never, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("[Error/type_mapping]: unmapped TS type `Foo`"));
    }

    #[test]
    fn renders_remediation_hint() {
        let diag = SourceDiagnostic::new(ErrorKind::SpecInvariant, "missing `nodeType`")
            .with_remediation("add a `nodeType` field to the spec");
        let mut buf = Vec::new();
        render_diagnostic(&diag, Severity::Error, ColorChoice::Never, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("hint: add a `nodeType` field to the spec"));
    }

    #[test]
    fn colored_output_contains_ansi_escapes() {
        let diag = SourceDiagnostic::new(ErrorKind::ApplyFailure, "rollback failed");
        let mut buf = Vec::new();
        render_diagnostic(&diag, Severity::Error, ColorChoice::Always, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("\x1b["));
    }

    #[test]
    fn digit_count_matches_expected_widths() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(100), 3);
    }
}
