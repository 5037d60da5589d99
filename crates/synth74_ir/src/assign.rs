//! Continuous assignments awaiting expression compilation.
//!
//! Parsing never compiles a boolean expression itself — it only locates the
//! `assign lhs = rhs ;` statement and records the raw right-hand-side text.
//! The expression compiler (outside this crate) tokenizes, rewrites
//! ternaries, and lowers that text into gates.

use serde::{Deserialize, Serialize};
use synth74_common::Ident;
use synth74_source::Span;

/// A single `assign` statement, not yet compiled into gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAssign {
    /// The sanitized left-hand-side net name.
    pub target: Ident,
    /// The right-hand-side expression, exactly as written in source.
    pub rhs_text: String,
    /// The source span of the entire `assign` statement.
    pub span: Span,
}
