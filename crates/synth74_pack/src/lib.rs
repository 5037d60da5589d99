//! Gate-to-IC packer for the synth74 HDL toolchain.
//!
//! Assigns every gate in a flattened design's gate list to a physical slot
//! inside a 74xx logic IC, following a static catalog of part numbers,
//! packages, and per-slot pinouts.

#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod pack;

pub use catalog::{catalog_entry, IcCatalogEntry, SlotPinout};
pub use error::PackError;
pub use pack::{pack, AliasTie, IcInstance, PackResult};
