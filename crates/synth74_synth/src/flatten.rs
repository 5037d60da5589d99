//! Hierarchy flattening: inlines every submodule instantiation into a
//! single, self-contained gate list for the design's top module.

use crate::error::HierarchyError;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use std::collections::{HashMap, HashSet};
use synth74_common::Ident;
use synth74_diagnostics::code::{Category, DiagnosticCode};
use synth74_diagnostics::{Diagnostic, DiagnosticSink};
use synth74_ir::{Design, Gate, GateId, GateKind, Module, ModuleId, ModuleInstance, Signal};
use synth74_source::Span;

/// The name instantiations match (case-insensitively) to lower directly to
/// a [`GateKind::Dff`] rather than resolving a user-declared module.
const UNIT_DFFE: &str = "UNIT_DFFE";

/// A design reduced to a single, fully-inlined top module.
#[derive(Debug, Clone)]
pub struct FlattenedModule {
    /// The top module's declared name.
    pub name: Ident,
    /// The top module's ports, in declaration order.
    pub ports: Vec<Signal>,
    /// Every gate in the design, after inlining, with all instance-local
    /// nets renamed to avoid collisions between sibling instances.
    pub gates: Vec<Gate>,
}

/// Flattens `design` into its top module's fully inlined gate list.
///
/// `top_override` is an optional module name (from project configuration)
/// that takes precedence over automatic top-module inference. If the
/// override names a module that doesn't exist, a warning is emitted and
/// inference falls back to the automatic rule.
pub fn flatten_design(
    design: &Design,
    interner: &synth74_common::Interner,
    sink: &DiagnosticSink,
    top_override: Option<Ident>,
) -> Result<FlattenedModule, HierarchyError> {
    if has_cycle(design, interner) {
        return Err(HierarchyError::new(
            "submodule instantiation graph contains a cycle",
            Span::DUMMY,
        ));
    }

    let top_id = resolve_top_id(design, interner, sink, top_override)?;
    let top = design.modules.get(top_id);
    let gates = flatten_module(design, top_id, interner, sink);
    let ports = top
        .ports
        .iter()
        .map(|id| top.signals.get(*id).clone())
        .collect();

    Ok(FlattenedModule {
        name: top.name,
        ports,
        gates,
    })
}

fn resolve_top_id(
    design: &Design,
    interner: &synth74_common::Interner,
    sink: &DiagnosticSink,
    top_override: Option<Ident>,
) -> Result<ModuleId, HierarchyError> {
    if let Some(name) = top_override {
        if let Some(id) = design.find_by_name(name) {
            return Ok(id);
        }
        sink.emit(Diagnostic::warning(
            DiagnosticCode::new(Category::Hierarchy, 3),
            format!(
                "configured top module `{}` not found, inferring automatically",
                interner.resolve(name)
            ),
            Span::DUMMY,
        ));
    }
    select_top_module(design).ok_or_else(|| HierarchyError::new("no candidate top module found", Span::DUMMY))
}

/// Picks the first, in declaration order, module that no other module
/// instantiates.
fn select_top_module(design: &Design) -> Option<ModuleId> {
    let mut instantiated: HashSet<Ident> = HashSet::new();
    for (_, m) in design.modules.iter() {
        for (_, inst) in m.instances.iter() {
            instantiated.insert(inst.module_name);
        }
    }
    design
        .modules
        .iter()
        .find(|(_, m)| !instantiated.contains(&m.name))
        .map(|(id, _)| id)
}

fn has_cycle(design: &Design, interner: &synth74_common::Interner) -> bool {
    let mut graph = DiGraph::<ModuleId, ()>::new();
    let mut node_of = HashMap::new();
    for (id, _) in design.modules.iter() {
        node_of.insert(id, graph.add_node(id));
    }
    for (id, m) in design.modules.iter() {
        for (_, inst) in m.instances.iter() {
            let name = interner.resolve(inst.module_name);
            if name.eq_ignore_ascii_case(UNIT_DFFE) {
                continue;
            }
            if let Some(target) = design.find_by_name(inst.module_name) {
                graph.add_edge(node_of[&id], node_of[&target], ());
            }
        }
    }
    toposort(&graph, None).is_err()
}

fn flatten_module(
    design: &Design,
    module_id: ModuleId,
    interner: &synth74_common::Interner,
    sink: &DiagnosticSink,
) -> Vec<Gate> {
    let module = design.modules.get(module_id);
    let mut gates: Vec<Gate> = module.gates.values().cloned().collect();

    for (_, inst) in module.instances.iter() {
        let type_name = interner.resolve(inst.module_name).to_string();
        if type_name.eq_ignore_ascii_case(UNIT_DFFE) {
            if let Some(gate) = lower_dffe(inst, interner, sink) {
                gates.push(gate);
            }
            continue;
        }

        let sub_id = match design.find_by_name(inst.module_name) {
            Some(id) => id,
            None => {
                sink.emit(Diagnostic::warning(
                    DiagnosticCode::new(Category::Hierarchy, 1),
                    format!("instantiation of undeclared module `{type_name}`"),
                    inst.span,
                ));
                continue;
            }
        };

        let sub_module = design.modules.get(sub_id);
        let sub_gates = flatten_module(design, sub_id, interner, sink);
        gates.extend(rename_gates(&sub_gates, sub_module, inst, interner));
    }

    gates
}

/// Lowers a `UNIT_DFFE` instantiation directly to a [`GateKind::Dff`] gate,
/// matching its `D`, `CLK`, `Q` port bindings case-insensitively.
fn lower_dffe(inst: &ModuleInstance, interner: &synth74_common::Interner, sink: &DiagnosticSink) -> Option<Gate> {
    let mut d = None;
    let mut clk = None;
    let mut q = None;
    for binding in &inst.port_map {
        match interner.resolve(binding.port).to_ascii_lowercase().as_str() {
            "d" => d = Some(binding.net),
            "clk" => clk = Some(binding.net),
            "q" => q = Some(binding.net),
            _ => {}
        }
    }
    match (d, clk, q) {
        (Some(d), Some(clk), Some(q)) => Some(Gate {
            id: GateId::from_raw(0),
            kind: GateKind::Dff,
            inputs: vec![d, clk],
            output: q,
            instance_tag: format!("{}_DFF", interner.resolve(inst.instance_name)),
            span: inst.span,
        }),
        _ => {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::new(Category::Hierarchy, 2),
                "UNIT_DFFE instantiation is missing a D, CLK, or Q port binding",
                inst.span,
            ));
            None
        }
    }
}

/// Renames every net referenced by `gates` (already lowered from
/// `sub_module`) into the parent scope: formal ports are substituted by
/// their `port_map` binding, everything else is prefixed with the
/// instance name to keep sibling instances' internal nets distinct.
fn rename_gates(
    gates: &[Gate],
    sub_module: &Module,
    inst: &ModuleInstance,
    interner: &synth74_common::Interner,
) -> Vec<Gate> {
    let instance_name = interner.resolve(inst.instance_name).to_string();
    let port_binding: HashMap<Ident, Ident> =
        inst.port_map.iter().map(|b| (b.port, b.net)).collect();
    let port_names: HashSet<Ident> = sub_module
        .ports
        .iter()
        .map(|sid| sub_module.signals.get(*sid).name)
        .collect();

    let mut cache: HashMap<Ident, Ident> = HashMap::new();
    let mut rename = |net: Ident| -> Ident {
        if let Some(bound) = port_binding.get(&net) {
            return *bound;
        }
        if !port_names.contains(&net) {
            if let Some(renamed) = cache.get(&net) {
                return *renamed;
            }
            let original = interner.resolve(net);
            let renamed = interner.get_or_intern(&format!("{instance_name}_{original}"));
            cache.insert(net, renamed);
            return renamed;
        }
        net
    };

    gates
        .iter()
        .map(|g| Gate {
            id: g.id,
            kind: g.kind,
            inputs: g.inputs.iter().map(|&n| rename(n)).collect(),
            output: rename(g.output),
            instance_tag: format!("{instance_name}_{}", g.instance_tag),
            span: g.span,
        })
        .collect()
}
