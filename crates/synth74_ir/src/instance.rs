//! Submodule instantiations within a module body.

use crate::ids::InstanceId;
use serde::{Deserialize, Serialize};
use synth74_common::Ident;
use synth74_source::Span;

/// A single `.port(net)` binding within a module instantiation's port map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortBinding {
    /// The name of the port on the instantiated module.
    pub port: Ident,
    /// The net expression bound to that port, exactly as written at the
    /// instantiation site (a bare identifier or bit-select).
    pub net: Ident,
}

/// An instantiation of one module inside another.
///
/// Hierarchy flattening replaces each [`ModuleInstance`] with the
/// instantiated module's gates, renamed and reconnected according to
/// `port_map` and an instance-name prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleInstance {
    /// The unique ID of this instance within its parent module.
    pub id: InstanceId,
    /// The name of the module type being instantiated (resolved by name,
    /// not by ID, since instantiation precedes module-graph resolution).
    pub module_name: Ident,
    /// The instance's own name, used as the renaming prefix for its
    /// internal nets after flattening.
    pub instance_name: Ident,
    /// Named port connections, in source order.
    pub port_map: Vec<PortBinding>,
    /// The source span of the instantiation statement.
    pub span: Span,
}
