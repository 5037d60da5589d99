//! Textual s-expression netlist emitter.
//!
//! Renders a [`ResolvedNetlist`] into the `(export (version ...) ...)`
//! document shape consumed by downstream PCB tooling.

use crate::resolve::{Component, ResolvedNetlist};
use std::fmt::Write;

/// Emits a complete s-expression netlist document for `top_name`.
///
/// `tool_version` and `run_index` feed the `(design ...)` header's
/// `date`/`tstamp` fields — callers should pass a deterministic, caller-owned
/// counter rather than a wall-clock timestamp to keep output byte-stable
/// across runs given identical input.
pub fn render_sexpr(netlist: &ResolvedNetlist, top_name: &str, tool_version: &str, run_index: u64) -> String {
    let mut out = String::new();
    writeln!(out, "(export (version D)").unwrap();
    writeln!(out, "  (design (source \"{top_name}\") (date \"run-{run_index}\") (tool \"{tool_version}\"))").unwrap();

    writeln!(out, "  (components").unwrap();
    for component in &netlist.components {
        render_component(&mut out, component, run_index);
    }
    writeln!(out, "  )").unwrap();

    writeln!(out, "  (nets").unwrap();
    for net in &netlist.nets {
        render_net(&mut out, net);
    }
    writeln!(out, "  )").unwrap();
    writeln!(out, ")").unwrap();
    out
}

fn render_component(out: &mut String, component: &Component, run_index: u64) {
    let (reference, value, footprint) = match component {
        Component::Ic { reference, part_number, package } => {
            (reference.as_str(), part_number.to_string(), format!("Package_DIP:{package}"))
        }
        Component::Capacitor { reference } => (reference.as_str(), "0.1uF".to_string(), "Capacitor_THT:C_Disc".to_string()),
        Component::Connector { reference, .. } => (reference.as_str(), "conn".to_string(), "Connector:pin".to_string()),
    };
    writeln!(
        out,
        "    (comp (ref {reference}) (value \"{value}\") (footprint \"{footprint}\") (fields) \
(libsource (lib synth74) (part {value})) (sheetpath (names /) (tstamps /)) (tstamp {run_index:08X}))"
    )
    .unwrap();
}

fn render_net(out: &mut String, net: &crate::resolve::Net) {
    writeln!(out, "    (net (code {}) (name \"{}\")", net.code, net.name).unwrap();
    for (reference, pin) in &net.endpoints {
        writeln!(out, "      (node (ref {reference}) (pin {pin}))").unwrap();
    }
    writeln!(out, "    )").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{ConnectorDirection, Net};

    #[test]
    fn empty_netlist_still_has_document_shape() {
        let netlist = ResolvedNetlist::default();
        let text = render_sexpr(&netlist, "top", "synth74 0.1", 1);
        assert!(text.starts_with("(export (version D)"));
        assert!(text.contains("(design (source \"top\")"));
        assert!(text.trim_end().ends_with(')'));
    }

    #[test]
    fn ic_component_renders_part_number_as_value() {
        let netlist = ResolvedNetlist {
            components: vec![Component::Ic { reference: "U1".into(), part_number: "74HC08", package: "DIP-14" }],
            nets: Vec::new(),
        };
        let text = render_sexpr(&netlist, "top", "synth74 0.1", 1);
        assert!(text.contains("(comp (ref U1) (value \"74HC08\")"));
        assert!(text.contains("Package_DIP:DIP-14"));
    }

    #[test]
    fn connector_component_renders() {
        let netlist = ResolvedNetlist {
            components: vec![Component::Connector { reference: "JIN_a".into(), direction: ConnectorDirection::In }],
            nets: Vec::new(),
        };
        let text = render_sexpr(&netlist, "top", "synth74 0.1", 1);
        assert!(text.contains("(comp (ref JIN_a)"));
    }

    #[test]
    fn net_renders_every_endpoint_node() {
        let netlist = ResolvedNetlist {
            components: Vec::new(),
            nets: vec![Net { name: "y".into(), code: 1, endpoints: vec![("U1".into(), 3), ("JOUT_y".into(), 1)] }],
        };
        let text = render_sexpr(&netlist, "top", "synth74 0.1", 1);
        assert!(text.contains("(net (code 1) (name \"y\")"));
        assert!(text.contains("(node (ref U1) (pin 3))"));
        assert!(text.contains("(node (ref JOUT_y) (pin 1))"));
    }

    #[test]
    fn capacitor_component_has_fixed_value() {
        let netlist = ResolvedNetlist {
            components: vec![Component::Capacitor { reference: "C1".into() }],
            nets: Vec::new(),
        };
        let text = render_sexpr(&netlist, "top", "synth74 0.1", 1);
        assert!(text.contains("(value \"0.1uF\")"));
    }
}
