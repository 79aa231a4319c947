//! Re-exports of the shared error taxonomy under the names this crate's callers expect.

pub use dipeo_codegen_errors::{CodegenError as Error, Collector, Diagnostic, ErrorKind, Result};
