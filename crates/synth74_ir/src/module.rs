//! Module definitions: the unit of declaration and instantiation.

use crate::arena::Arena;
use crate::assign::PendingAssign;
use crate::gate::Gate;
use crate::ids::{GateId, InstanceId, ModuleId, SignalId};
use crate::instance::ModuleInstance;
use crate::signal::{Signal, SignalKind};
use serde::{Deserialize, Serialize};
use synth74_common::Ident;
use synth74_source::Span;

/// A single HDL module: a named collection of ports, internal wires, gate
/// primitives, and submodule instantiations.
///
/// Before hierarchy flattening, `gates` holds only the gates produced
/// directly by this module's own `assign` and `always` statements — gates
/// contributed by instantiated submodules live in `instances` until
/// flattening inlines them. After flattening, `instances` is empty and
/// `gates` holds the module's complete, self-contained gate list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// The unique ID of this module within the design.
    pub id: ModuleId,
    /// The module's declared name.
    pub name: Ident,
    /// Ports, in declaration order.
    pub ports: Vec<SignalId>,
    /// All signals (ports and internal wires) declared in this module.
    pub signals: Arena<SignalId, Signal>,
    /// Gate primitives directly produced by this module's own logic.
    pub gates: Arena<GateId, Gate>,
    /// Submodule instantiations awaiting flattening.
    pub instances: Arena<InstanceId, ModuleInstance>,
    /// `assign` statements not yet lowered to gates by the expression compiler.
    ///
    /// `always @(posedge clk)` blocks need no staging here — parsing lowers
    /// them directly into a [`GateKind::Dff`](crate::gate::GateKind::Dff) gate
    /// in `gates`, since that transform requires no expression compilation.
    pub pending_assigns: Vec<PendingAssign>,
    /// The source span of the module declaration.
    pub span: Span,
}

impl Module {
    /// Returns the input ports, in declaration order.
    pub fn input_ports(&self) -> impl Iterator<Item = &Signal> {
        self.ports
            .iter()
            .map(|id| &self.signals[*id])
            .filter(|s| s.kind == SignalKind::Input)
    }

    /// Returns the output ports, in declaration order.
    pub fn output_ports(&self) -> impl Iterator<Item = &Signal> {
        self.ports
            .iter()
            .map(|id| &self.signals[*id])
            .filter(|s| s.kind == SignalKind::Output)
    }

    /// Returns `true` once all submodule instantiations have been inlined.
    pub fn is_flattened(&self) -> bool {
        self.instances.is_empty()
    }
}
