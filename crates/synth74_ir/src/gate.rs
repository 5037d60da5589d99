//! 2-input gate primitives, the output of boolean expression lowering.
//!
//! Every gate in a flattened design is one of a small, fixed set of
//! primitives: a 2-input boolean gate, an inverter, a D flip-flop, or a
//! synthetic alias. There is no user-defined primitive and no N-input gate;
//! wider expressions are built by chaining 2-input gates during lowering.

use crate::ids::GateId;
use serde::{Deserialize, Serialize};
use synth74_common::Ident;
use synth74_source::Span;

/// The kind of a gate primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// 2-input AND.
    And,
    /// 2-input OR.
    Or,
    /// 2-input XOR.
    Xor,
    /// 1-input inverter.
    Not,
    /// Positive edge-triggered D flip-flop (`d`, `clk` -> `q`).
    Dff,
    /// A synthetic net alias, not a physical gate. Produced when an
    /// `assign` statement's right-hand side is a bare identifier; collapsed
    /// into a net merge rather than packed into a chip.
    Alias,
}

impl GateKind {
    /// Returns the number of input pins this gate kind consumes.
    pub fn input_count(self) -> usize {
        match self {
            GateKind::And | GateKind::Or | GateKind::Xor => 2,
            GateKind::Not | GateKind::Alias => 1,
            GateKind::Dff => 2,
        }
    }
}

/// A single gate-level primitive: a fixed number of input nets driving one
/// output net.
///
/// Gates are produced by lowering a boolean expression's AST in post-order;
/// each internal node becomes one gate whose output is a freshly allocated
/// temporary net name. Leaf identifiers never produce a gate of their own —
/// they are substituted directly as an input net reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    /// The unique ID of this gate within its module.
    pub id: GateId,
    /// The gate primitive kind.
    pub kind: GateKind,
    /// Input net names, in pin order. For [`GateKind::Dff`] this is `[d, clk]`.
    pub inputs: Vec<Ident>,
    /// The net name this gate drives.
    pub output: Ident,
    /// A human-readable tag identifying this gate's origin (e.g.
    /// `AND_2_tmp_and_0`), mangled with the enclosing instance name on every
    /// level of hierarchy flattening it passes through. Not interned: it is
    /// diagnostic/debugging metadata, never looked up by name.
    pub instance_tag: String,
    /// The source span of the expression or statement that produced this gate.
    pub span: Span,
}

impl Gate {
    /// Returns `true` if `inputs` has the arity required by `kind`.
    pub fn has_valid_arity(&self) -> bool {
        self.inputs.len() == self.kind.input_count()
    }
}
