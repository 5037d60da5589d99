//! JSON IR emitter: an optional, machine-readable alternative to the
//! s-expression netlist, describing ports and packed IC instances.

use serde::{Deserialize, Serialize};
use synth74_common::Interner;
use synth74_ir::{GateKind, Signal, SignalKind};
use synth74_pack::PackResult;

/// One top-level port entry in the JSON IR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortIr {
    /// The port name.
    pub name: String,
    /// The declared bit width.
    pub width: u32,
}

/// One gate packed into an IC instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateIr {
    /// The gate kind, lowercase (`"and"`, `"or"`, `"xor"`, `"not"`, `"dff"`).
    #[serde(rename = "type")]
    pub gate_type: String,
    /// Input net names, in declaration order.
    pub inputs: Vec<String>,
    /// The output net name.
    pub output: String,
}

/// One packed IC instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcInstanceIr {
    /// The reference designator, e.g. `"U1"`.
    pub instance_id: String,
    /// The part number, e.g. `"74HC08"`.
    pub part_number: String,
    /// The package name, e.g. `"DIP-14"`.
    pub package: String,
    /// Pin number to net name, as decimal-keyed string pairs.
    pub pin_assignments: Vec<(u32, String)>,
    /// The gates packed into this instance's slots, in slot order.
    pub gates: Vec<GateIr>,
}

/// The complete JSON IR document for one synthesized module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleIr {
    /// The module's name.
    pub module_name: String,
    /// Declared input ports.
    pub inputs: Vec<PortIr>,
    /// Declared output ports.
    pub outputs: Vec<PortIr>,
    /// Every packed IC instance, in allocation order.
    pub ic_instances: Vec<IcInstanceIr>,
}

fn gate_type_name(kind: GateKind) -> &'static str {
    match kind {
        GateKind::And => "and",
        GateKind::Or => "or",
        GateKind::Xor => "xor",
        GateKind::Not => "not",
        GateKind::Dff => "dff",
        GateKind::Alias => "alias",
    }
}

/// Builds the JSON IR document for `module_name` from its declared ports
/// and packed IC instances.
pub fn build_module_ir(module_name: &str, ports: &[Signal], pack_result: &PackResult, interner: &Interner) -> ModuleIr {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for port in ports {
        let entry = PortIr { name: interner.resolve(port.name).to_string(), width: port.width };
        match port.kind {
            SignalKind::Input => inputs.push(entry),
            SignalKind::Output => outputs.push(entry),
            SignalKind::Wire => {}
        }
    }

    let ic_instances = pack_result
        .ics
        .iter()
        .map(|ic| {
            let mut pin_assignments: Vec<(u32, String)> =
                ic.pin_net.iter().map(|(&pin, &net)| (pin, interner.resolve(net).to_string())).collect();
            pin_assignments.sort_by_key(|(pin, _)| *pin);

            let gates = ic
                .gates
                .iter()
                .map(|gate| GateIr {
                    gate_type: gate_type_name(gate.kind).to_string(),
                    inputs: gate.inputs.iter().map(|&i| interner.resolve(i).to_string()).collect(),
                    output: interner.resolve(gate.output).to_string(),
                })
                .collect();

            IcInstanceIr {
                instance_id: ic.reference.clone(),
                part_number: ic.part_number.to_string(),
                package: ic.package.to_string(),
                pin_assignments,
                gates,
            }
        })
        .collect();

    ModuleIr { module_name: module_name.to_string(), inputs, outputs, ic_instances }
}
