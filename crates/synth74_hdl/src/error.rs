//! The fatal parse error kind for this crate.

use synth74_source::Span;
use thiserror::Error;

/// A malformed module header, port declaration, or instantiation connection.
///
/// Unlike recoverable expression errors (handled by the expression
/// compiler), a `ParseError` is always fatal: parsing stops at the first
/// one encountered. Unrecognized constructs inside a module body that are
/// *not* malformed headers/ports/connections are silently skipped instead
/// of raising this error.
#[derive(Debug, Error)]
#[error("parse error at {span:?}: {reason}")]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub reason: String,
    /// The source span where the error was detected.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(reason: impl Into<String>, span: Span) -> Self {
        Self {
            reason: reason.into(),
            span,
        }
    }
}
