//! Expression compilation and hierarchy flattening for the synth74 HDL
//! toolchain.
//!
//! This crate turns a parsed [`Design`] — modules whose `assign` statements
//! are still raw, uncompiled text, and whose submodule instantiations are
//! still unresolved — into a single flat gate list ready for IC packing:
//! 1. **Expression compilation** — lowers each `assign` right-hand side into
//!    2-input gate primitives ([`expr_compile`]).
//! 2. **Hierarchy flattening** — inlines every submodule instantiation into
//!    the top module, renaming instance-local nets to avoid collisions
//!    ([`flatten`]).

#![warn(missing_docs)]

pub mod error;
pub mod expr_compile;
pub mod flatten;

pub use error::{ExpressionError, HierarchyError};
pub use expr_compile::TempCounter;
pub use flatten::{flatten_design, FlattenedModule};

use synth74_common::{Ident, Interner};
use synth74_diagnostics::DiagnosticSink;
use synth74_ir::Design;

/// Compiles every module's pending `assign` statements into gates, then
/// flattens the instantiation hierarchy into a single top-level gate list.
///
/// `top_override` is an optional top-module name from project
/// configuration; `None` selects the top module automatically.
pub fn synthesize(
    design: &mut Design,
    interner: &Interner,
    sink: &DiagnosticSink,
    top_override: Option<Ident>,
) -> Result<FlattenedModule, HierarchyError> {
    let mut counter = TempCounter::new();

    for (_, module) in design.modules.iter_mut() {
        let pending = std::mem::take(&mut module.pending_assigns);
        for pending_assign in &pending {
            let gates = expr_compile::compile_assign(pending_assign, interner, &mut counter, sink);
            for gate in gates {
                module.gates.alloc(gate);
            }
        }
    }

    flatten::flatten_design(design, interner, sink, top_override)
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth74_ir::{Arena, GateKind, Module, ModuleId, Signal, SignalId, SignalKind};
    use synth74_ir::PendingAssign;
    use synth74_source::Span;

    fn module_with_assign(interner: &Interner, name: &str, rhs: &str) -> Module {
        let mut signals = Arena::new();
        let a = signals.alloc(Signal {
            id: SignalId::from_raw(0),
            name: interner.get_or_intern("a"),
            width: 1,
            kind: SignalKind::Input,
            span: Span::DUMMY,
        });
        let b = signals.alloc(Signal {
            id: SignalId::from_raw(1),
            name: interner.get_or_intern("b"),
            width: 1,
            kind: SignalKind::Input,
            span: Span::DUMMY,
        });
        let y = signals.alloc(Signal {
            id: SignalId::from_raw(2),
            name: interner.get_or_intern("y"),
            width: 1,
            kind: SignalKind::Output,
            span: Span::DUMMY,
        });
        let _ = (a, b);

        Module {
            id: ModuleId::from_raw(0),
            name: interner.get_or_intern(name),
            ports: vec![signals.get(y).id],
            signals,
            gates: Arena::new(),
            instances: Arena::new(),
            pending_assigns: vec![PendingAssign {
                target: interner.get_or_intern("y"),
                rhs_text: rhs.to_string(),
                span: Span::DUMMY,
            }],
            span: Span::DUMMY,
        }
    }

    #[test]
    fn synthesize_compiles_assign_and_flattens() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut design = Design::new();
        let id = design.modules.alloc(module_with_assign(&interner, "top", "a & b"));
        design.modules.get_mut(id).id = id;

        let result = synthesize(&mut design, &interner, &sink, None).unwrap();
        assert_eq!(result.gates.len(), 1);
        assert_eq!(result.gates[0].kind, GateKind::And);
        assert!(!sink.has_errors());
    }

    #[test]
    fn synthesize_drains_pending_assigns() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut design = Design::new();
        let id = design.modules.alloc(module_with_assign(&interner, "top", "a | b"));
        design.modules.get_mut(id).id = id;

        synthesize(&mut design, &interner, &sink, None).unwrap();
        assert!(design.modules.get(id).pending_assigns.is_empty());
    }
}
