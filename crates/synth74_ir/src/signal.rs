//! Signal (port and wire) declarations within a module.

use crate::ids::SignalId;
use serde::{Deserialize, Serialize};
use synth74_common::Ident;
use synth74_source::Span;

/// The declared direction (or lack thereof) of a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// A module input port.
    Input,
    /// A module output port.
    Output,
    /// An internal wire, not part of the module's port list.
    Wire,
}

/// A signal declared within a module: a port or an internal wire.
///
/// Every signal is a bit vector of `width` bits. Gate primitives always
/// operate bit-by-bit; a multi-bit signal is addressed one bit at a time
/// through bit-select syntax (`name[index]`) in expressions, never as a
/// whole-vector operand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// The unique ID of this signal within its module.
    pub id: SignalId,
    /// The signal name, exactly as declared in the source (unsanitized).
    pub name: Ident,
    /// The bit width of this signal (1 for a scalar wire).
    pub width: u32,
    /// Whether this is a port and, if so, its direction.
    pub kind: SignalKind,
    /// The source span where this signal was declared.
    pub span: Span,
}

impl Signal {
    /// Returns `true` if this signal is a module port (input or output).
    pub fn is_port(&self) -> bool {
        matches!(self.kind, SignalKind::Input | SignalKind::Output)
    }
}
