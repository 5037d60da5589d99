//! Error kinds produced by expression compilation and hierarchy flattening.

use synth74_source::Span;
use thiserror::Error;

/// A malformed continuous-assignment right-hand side.
///
/// Recoverable: the offending assignment contributes zero gates and a
/// warning diagnostic is recorded on the sink. Compilation of other
/// assignments continues.
#[derive(Debug, Error)]
#[error("expression error at {span:?}: {reason}")]
pub struct ExpressionError {
    /// Human-readable description (unbalanced parentheses, trailing
    /// operator, empty subexpression, unknown character).
    pub reason: String,
    /// The source span of the `assign` statement this expression belongs to.
    pub span: Span,
}

impl ExpressionError {
    /// Creates a new expression error.
    pub fn new(reason: impl Into<String>, span: Span) -> Self {
        Self {
            reason: reason.into(),
            span,
        }
    }
}

/// A fatal failure in the module-instantiation hierarchy.
///
/// Raised for a submodule instantiation cycle. A reference to an
/// undeclared submodule is, per the testable-properties scenarios, *not*
/// an error of this kind — it contributes zero gates and a warning.
#[derive(Debug, Error)]
#[error("hierarchy error at {span:?}: {reason}")]
pub struct HierarchyError {
    /// Human-readable description.
    pub reason: String,
    /// The source span of the instantiation (or module) implicated.
    pub span: Span,
}

impl HierarchyError {
    /// Creates a new hierarchy error.
    pub fn new(reason: impl Into<String>, span: Span) -> Self {
        Self {
            reason: reason.into(),
            span,
        }
    }
}
