//! The gate-level intermediate representation shared by every synth74 stage
//! after HDL parsing.
//!
//! This crate defines the core IR types — [`table::Design`], [`module::Module`],
//! [`signal::Signal`], [`gate::Gate`], and [`instance::ModuleInstance`] — that
//! carry a design from hierarchical, per-module form through flattening.

#![warn(missing_docs)]

pub mod arena;
pub mod assign;
pub mod gate;
pub mod ids;
pub mod instance;
pub mod module;
pub mod signal;
pub mod table;

pub use arena::{Arena, ArenaId};
pub use assign::PendingAssign;
pub use gate::{Gate, GateKind};
pub use ids::{GateId, InstanceId, ModuleId, SignalId};
pub use instance::{ModuleInstance, PortBinding};
pub use module::Module;
pub use signal::{Signal, SignalKind};
pub use table::Design;
