//! The packing algorithm: groups flattened gates by kind and assigns them
//! to consecutive slots inside allocated IC instances.

use crate::catalog::catalog_entry;
use crate::error::PackError;
use std::collections::HashMap;
use synth74_common::{Ident, Interner};
use synth74_ir::{Gate, GateKind};

/// One allocated, physically packed IC.
#[derive(Debug, Clone)]
pub struct IcInstance {
    /// Reference designator, e.g. `"U1"`.
    pub reference: String,
    /// The part number, e.g. `"74HC08"`.
    pub part_number: &'static str,
    /// The package name, e.g. `"DIP-14"`.
    pub package: &'static str,
    /// Total physical pin count of the package (14 for every part in the
    /// current catalog).
    pub pin_count: u32,
    /// Pin number to net mapping, including the bound `VCC`/`GND` pins.
    pub pin_net: HashMap<u32, Ident>,
    /// The gates packed into this IC, in slot order.
    pub gates: Vec<Gate>,
}

/// A net-tie directive produced by an `ALIAS` gate: `dst` and `src` refer
/// to the same electrical node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasTie {
    /// The destination net (the `assign` statement's left-hand side).
    pub dst: Ident,
    /// The source net (the aliased right-hand-side identifier).
    pub src: Ident,
}

/// The result of packing a flattened gate list.
#[derive(Debug, Clone, Default)]
pub struct PackResult {
    /// Every allocated real IC, in allocation (reference-numbering) order.
    pub ics: Vec<IcInstance>,
    /// Net-tie directives contributed by `ALIAS` gates, for the Net
    /// Resolver to merge.
    pub aliases: Vec<AliasTie>,
}

/// Packs `gates` into ICs.
///
/// Gates are grouped by kind, in the order each kind is first seen in
/// `gates`; within a group, gates keep their original relative order.
/// Each group of `N` gates of a kind with capacity `C` per IC allocates
/// `ceil(N / C)` ICs, filled positionally in pinout-declaration order.
/// `ALIAS` gates are never packed into an IC — they become [`AliasTie`]
/// entries instead.
pub fn pack(gates: &[Gate], interner: &Interner) -> Result<PackResult, PackError> {
    let vcc = interner.get_or_intern("VCC");
    let gnd = interner.get_or_intern("GND");

    let mut kind_order: Vec<GateKind> = Vec::new();
    for gate in gates {
        if gate.kind == GateKind::Alias {
            continue;
        }
        if !kind_order.contains(&gate.kind) {
            kind_order.push(gate.kind);
        }
    }

    let mut ics = Vec::new();
    let mut next_ref = 1u32;

    for kind in kind_order {
        let entry = catalog_entry(kind).ok_or(PackError::new(kind))?;
        let group: Vec<&Gate> = gates.iter().filter(|g| g.kind == kind).collect();

        for chunk in group.chunks(entry.slots_per_ic) {
            let mut pin_net = HashMap::new();
            for (slot_idx, gate) in chunk.iter().enumerate() {
                let pinout = &entry.pinouts[slot_idx];
                for (&pin, &net) in pinout.inputs.iter().zip(gate.inputs.iter()) {
                    pin_net.insert(pin, net);
                }
                pin_net.insert(pinout.output, gate.output);
            }
            pin_net.insert(entry.vcc_pin, vcc);
            pin_net.insert(entry.gnd_pin, gnd);

            ics.push(IcInstance {
                reference: format!("U{next_ref}"),
                part_number: entry.part_number,
                package: entry.package,
                pin_count: entry.pin_count,
                pin_net,
                gates: chunk.iter().map(|&g| g.clone()).collect(),
            });
            next_ref += 1;
        }
    }

    let aliases = gates
        .iter()
        .filter(|g| g.kind == GateKind::Alias)
        .map(|g| AliasTie { dst: g.output, src: g.inputs[0] })
        .collect();

    Ok(PackResult { ics, aliases })
}
