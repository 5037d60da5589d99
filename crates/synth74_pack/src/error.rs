//! Error kinds produced by gate-to-IC packing.

use synth74_ir::GateKind;
use thiserror::Error;

/// A gate kind with no catalog entry was encountered while packing.
///
/// Fatal: with [`GateKind`] a closed enum and a catalog entry covering
/// every physical kind, this only fires if the catalog and the IR's gate
/// kinds ever drift out of sync.
#[derive(Debug, Error)]
#[error("no 74xx catalog entry for gate kind {kind:?}")]
pub struct PackError {
    /// The gate kind that has no catalog mapping.
    pub kind: GateKind,
}

impl PackError {
    /// Creates a new pack error for an unmapped gate kind.
    pub fn new(kind: GateKind) -> Self {
        Self { kind }
    }
}
