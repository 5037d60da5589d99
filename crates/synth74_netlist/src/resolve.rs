//! The Net Resolver: turns a flattened gate list plus its packed IC
//! instances into the final net set handed to the output formatters.

use std::collections::HashMap;
use synth74_common::Interner;
use synth74_ir::{Signal, SignalKind};
use synth74_pack::PackResult;

/// Direction of an I/O connector pseudo-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorDirection {
    /// A top-level input port connector (`JIN_<name>`).
    In,
    /// A top-level output port connector (`JOUT_<name>`).
    Out,
}

/// A component emitted into the final netlist: a real IC, a decoupling
/// capacitor, or an I/O connector pin.
#[derive(Debug, Clone)]
pub enum Component {
    /// A packed 74xx logic IC.
    Ic {
        /// Reference designator, e.g. `"U1"`.
        reference: String,
        /// Part number, e.g. `"74HC08"`.
        part_number: &'static str,
        /// Package name, e.g. `"DIP-14"`.
        package: &'static str,
    },
    /// A 0.1uF decoupling capacitor bound across one IC's VCC/GND pins.
    Capacitor {
        /// Reference designator, e.g. `"C1"`.
        reference: String,
    },
    /// A single-pin I/O connector anchoring one top-level port net.
    Connector {
        /// Reference designator, e.g. `"JIN_a"` or `"JOUT_y_0"`.
        reference: String,
        /// Whether this connector is an input or output anchor.
        direction: ConnectorDirection,
    },
}

impl Component {
    /// The reference designator shared by every component kind.
    pub fn reference(&self) -> &str {
        match self {
            Component::Ic { reference, .. } => reference,
            Component::Capacitor { reference } => reference,
            Component::Connector { reference, .. } => reference,
        }
    }
}

/// A single endpoint of a net: a component reference and a pin number.
pub type Endpoint = (String, u32);

/// A resolved net: a name, a stable numeric code, and its endpoint set.
#[derive(Debug, Clone)]
pub struct Net {
    /// The net name as it will be emitted, e.g. `"a"`, `"VCC"`, `"GND_UNUSED"`.
    pub name: String,
    /// A stable, deterministic numeric code assigned at the end of
    /// resolution — never derived from randomness or wall-clock time.
    pub code: u32,
    /// Every `(component-ref, pin)` pair connected to this net.
    pub endpoints: Vec<Endpoint>,
}

/// The final output of net resolution: every component and every net.
#[derive(Debug, Clone, Default)]
pub struct ResolvedNetlist {
    /// Every component in emission order.
    pub components: Vec<Component>,
    /// Every net, with final stable codes assigned.
    pub nets: Vec<Net>,
}

/// Tombstone-based net table: removing a net during an alias merge does not
/// require reindexing every other net's position, only deleting its slot.
struct NetBuilder {
    slots: Vec<Option<Net>>,
    index: HashMap<String, usize>,
}

impl NetBuilder {
    fn new() -> Self {
        Self { slots: Vec::new(), index: HashMap::new() }
    }

    fn ensure(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.slots.len();
        self.slots.push(Some(Net { name: name.to_string(), code: 0, endpoints: Vec::new() }));
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn connect(&mut self, name: &str, reference: &str, pin: u32) {
        let idx = self.ensure(name);
        self.slots[idx].as_mut().unwrap().endpoints.push((reference.to_string(), pin));
    }

    /// Unions the endpoint set of `src` into `dst`, then removes `src`.
    /// A no-op if `dst == src` or `src` has no net yet.
    fn merge(&mut self, dst: &str, src: &str) {
        if dst == src {
            return;
        }
        let Some(&src_idx) = self.index.get(src) else {
            return;
        };
        let src_net = match self.slots[src_idx].take() {
            Some(net) => net,
            None => return,
        };
        self.index.remove(src);
        let dst_idx = self.ensure(dst);
        self.slots[dst_idx].as_mut().unwrap().endpoints.extend(src_net.endpoints);
    }

    /// Drops tombstones and assigns final, deterministic net codes.
    fn finish(self) -> Vec<Net> {
        let mut nets: Vec<Net> = self.slots.into_iter().flatten().collect();
        for (i, net) in nets.iter_mut().enumerate() {
            net.code = (i + 1) as u32;
        }
        nets
    }
}

fn port_net_names(signal: &Signal, interner: &Interner) -> Vec<String> {
    let base = interner.resolve(signal.name);
    if signal.width <= 1 {
        vec![base.to_string()]
    } else {
        (0..signal.width).map(|i| format!("{base}_{i}")).collect()
    }
}

/// Runs the Net Resolver over a flattened module and its packed ICs.
///
/// Order of operations follows the design: initial I/O connector nets,
/// a unified gate-driven/power-net connection pass over every IC's pin
/// map, one decoupling capacitor per real IC, alias merges, unused-input
/// tie-down to a shared `GND_UNUSED` net, and a final defensive port
/// dedup pass.
pub fn resolve(ports: &[Signal], pack_result: &PackResult, interner: &Interner) -> ResolvedNetlist {
    let mut builder = NetBuilder::new();
    let mut components = Vec::new();

    let mut seen_ports: HashMap<String, u32> = HashMap::new();
    for port in ports {
        let name = interner.resolve(port.name).to_string();
        let widest = seen_ports.entry(name.clone()).or_insert(port.width);
        if port.width > *widest {
            *widest = port.width;
        }
    }

    for port in ports {
        let name = interner.resolve(port.name).to_string();
        if seen_ports.get(&name).copied() != Some(port.width) {
            // A narrower duplicate declaration of this name; the widest
            // declaration already won in `seen_ports` and will emit the
            // connector family, so skip this one.
            continue;
        }
        seen_ports.remove(&name);

        let direction = match port.kind {
            SignalKind::Input => ConnectorDirection::In,
            SignalKind::Output => ConnectorDirection::Out,
            SignalKind::Wire => continue,
        };
        let prefix = match direction {
            ConnectorDirection::In => "JIN",
            ConnectorDirection::Out => "JOUT",
        };
        for net_name in port_net_names(port, interner) {
            let reference = format!("{prefix}_{net_name}");
            builder.connect(&net_name, &reference, 1);
            components.push(Component::Connector { reference, direction });
        }
    }

    for ic in &pack_result.ics {
        components.push(Component::Ic {
            reference: ic.reference.clone(),
            part_number: ic.part_number,
            package: ic.package,
        });
        for (&pin, &net_ident) in &ic.pin_net {
            let net_name = interner.resolve(net_ident);
            builder.connect(net_name, &ic.reference, pin);
        }
    }

    for (i, ic) in pack_result.ics.iter().enumerate() {
        let reference = format!("C{}", i + 1);
        builder.connect("VCC", &reference, 1);
        builder.connect("GND", &reference, 2);
        components.push(Component::Capacitor { reference });
        let _ = ic;
    }

    for tie in &pack_result.aliases {
        let dst = interner.resolve(tie.dst).to_string();
        let src = interner.resolve(tie.src).to_string();
        builder.merge(&dst, &src);
    }

    for ic in &pack_result.ics {
        let used_pins: std::collections::HashSet<u32> = ic.pin_net.keys().copied().collect();
        for pin in 1..=ic.pin_count {
            if !used_pins.contains(&pin) {
                builder.connect("GND_UNUSED", &ic.reference, pin);
            }
        }
    }

    ResolvedNetlist { components, nets: builder.finish() }
}
