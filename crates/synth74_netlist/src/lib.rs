//! Net resolution and netlist document emission for the synth74 HDL
//! toolchain.
//!
//! Consumes a flattened module and its packed IC instances and produces the
//! final net set, then renders that net set into the s-expression netlist
//! format, an optional JSON IR, and a non-normative schematic placement
//! grid.

#![warn(missing_docs)]

pub mod json_ir;
pub mod placement;
pub mod resolve;
pub mod sexpr;

pub use json_ir::{build_module_ir, GateIr, IcInstanceIr, ModuleIr, PortIr};
pub use placement::{grid_placements, Placement};
pub use resolve::{resolve, Component, ConnectorDirection, Endpoint, Net, ResolvedNetlist};
pub use sexpr::render_sexpr;

#[cfg(test)]
mod tests {
    use super::*;
    use synth74_common::Interner;
    use synth74_ir::{GateId, GateKind, SignalId, SignalKind};
    use synth74_pack::pack;
    use synth74_source::Span;

    #[test]
    fn full_pipeline_from_gates_to_sexpr_document() {
        let interner = Interner::new();
        let a = interner.get_or_intern("a");
        let b = interner.get_or_intern("b");
        let y = interner.get_or_intern("y");
        let gates = vec![synth74_ir::Gate {
            id: GateId::from_raw(0),
            kind: GateKind::And,
            inputs: vec![a, b],
            output: y,
            instance_tag: String::new(),
            span: Span::DUMMY,
        }];
        let pack_result = pack(&gates, &interner).unwrap();
        let ports = vec![
            synth74_ir::Signal { id: SignalId::from_raw(0), name: a, width: 1, kind: SignalKind::Input, span: Span::DUMMY },
            synth74_ir::Signal { id: SignalId::from_raw(1), name: b, width: 1, kind: SignalKind::Input, span: Span::DUMMY },
            synth74_ir::Signal { id: SignalId::from_raw(2), name: y, width: 1, kind: SignalKind::Output, span: Span::DUMMY },
        ];

        let resolved = resolve(&ports, &pack_result, &interner);
        let text = render_sexpr(&resolved, "top", "synth74 0.1", 1);
        assert!(text.contains("(comp (ref U1) (value \"74HC08\")"));
        assert!(text.contains("(net (code"));

        let ir = build_module_ir("top", &ports, &pack_result, &interner);
        assert_eq!(ir.ic_instances.len(), 1);

        let placements = grid_placements(resolved.components.len());
        assert_eq!(placements.len(), resolved.components.len());
    }
}
