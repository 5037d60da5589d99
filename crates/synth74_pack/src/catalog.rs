//! Static 74xx catalog: maps each gate primitive kind to a part number,
//! package, per-IC slot capacity, and per-slot pin assignment.
//!
//! Modeled as const data tables rather than a runtime-built registry — the
//! catalog never changes after compilation and every lookup is O(1) via a
//! match on [`GateKind`].

use synth74_ir::GateKind;

/// The physical pin layout of one logical gate slot within an IC package.
pub struct SlotPinout {
    /// Input pin numbers, in the same order as [`synth74_ir::Gate::inputs`].
    pub inputs: &'static [u32],
    /// The output pin number.
    pub output: u32,
}

/// A catalog entry for one physical 74xx part.
pub struct IcCatalogEntry {
    /// The part number, e.g. `"74HC08"`.
    pub part_number: &'static str,
    /// The package name, e.g. `"DIP-14"`.
    pub package: &'static str,
    /// Number of gate slots per IC.
    pub slots_per_ic: usize,
    /// Per-slot pinout, in slot-declaration order.
    pub pinouts: &'static [SlotPinout],
    /// The power-supply pin number.
    pub vcc_pin: u32,
    /// The ground pin number.
    pub gnd_pin: u32,
    /// Total physical pin count of the package.
    pub pin_count: u32,
}

const AND_OR_XOR_PINOUTS: &[SlotPinout] = &[
    SlotPinout { inputs: &[1, 2], output: 3 },
    SlotPinout { inputs: &[4, 5], output: 6 },
    SlotPinout { inputs: &[9, 10], output: 8 },
    SlotPinout { inputs: &[12, 13], output: 11 },
];

const AND_CATALOG: IcCatalogEntry = IcCatalogEntry {
    part_number: "74HC08",
    package: "DIP-14",
    slots_per_ic: 4,
    pinouts: AND_OR_XOR_PINOUTS,
    vcc_pin: 14,
    gnd_pin: 7,
    pin_count: 14,
};

const OR_CATALOG: IcCatalogEntry = IcCatalogEntry {
    part_number: "74HC32",
    package: "DIP-14",
    slots_per_ic: 4,
    pinouts: AND_OR_XOR_PINOUTS,
    vcc_pin: 14,
    gnd_pin: 7,
    pin_count: 14,
};

const XOR_CATALOG: IcCatalogEntry = IcCatalogEntry {
    part_number: "74HC86",
    package: "DIP-14",
    slots_per_ic: 4,
    pinouts: AND_OR_XOR_PINOUTS,
    vcc_pin: 14,
    gnd_pin: 7,
    pin_count: 14,
};

const NOT_PINOUTS: &[SlotPinout] = &[
    SlotPinout { inputs: &[1], output: 2 },
    SlotPinout { inputs: &[3], output: 4 },
    SlotPinout { inputs: &[5], output: 6 },
    SlotPinout { inputs: &[9], output: 8 },
    SlotPinout { inputs: &[11], output: 10 },
    SlotPinout { inputs: &[13], output: 12 },
];

const NOT_CATALOG: IcCatalogEntry = IcCatalogEntry {
    part_number: "74HC04",
    package: "DIP-14",
    slots_per_ic: 6,
    pinouts: NOT_PINOUTS,
    vcc_pin: 14,
    gnd_pin: 7,
    pin_count: 14,
};

const DFF_PINOUTS: &[SlotPinout] = &[
    SlotPinout { inputs: &[2, 3], output: 5 },
    SlotPinout { inputs: &[12, 11], output: 9 },
];

const DFF_CATALOG: IcCatalogEntry = IcCatalogEntry {
    part_number: "74HC74",
    package: "DIP-14",
    slots_per_ic: 2,
    pinouts: DFF_PINOUTS,
    vcc_pin: 14,
    gnd_pin: 7,
    pin_count: 14,
};

/// Looks up the catalog entry for a gate kind.
///
/// Returns `None` for [`GateKind::Alias`] — an alias is a net-tie
/// directive, never a physical IC.
pub fn catalog_entry(kind: GateKind) -> Option<&'static IcCatalogEntry> {
    match kind {
        GateKind::And => Some(&AND_CATALOG),
        GateKind::Or => Some(&OR_CATALOG),
        GateKind::Xor => Some(&XOR_CATALOG),
        GateKind::Not => Some(&NOT_CATALOG),
        GateKind::Dff => Some(&DFF_CATALOG),
        GateKind::Alias => None,
    }
}
