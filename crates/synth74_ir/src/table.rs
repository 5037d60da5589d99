//! Top-level design container: every module parsed from a source file.

use crate::arena::Arena;
use crate::ids::ModuleId;
use crate::module::Module;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use synth74_common::Ident;

/// The complete set of modules parsed from a single HDL source file.
///
/// Unlike a design with parameterized elaboration, `Design` carries no
/// notion of a resolved top module of its own — identifying the top module
/// requires analyzing the instantiation graph, which happens during
/// hierarchy flattening, not while building the IR.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Design {
    /// All modules, keyed by [`ModuleId`], in declaration order.
    pub modules: Arena<ModuleId, Module>,
}

impl Design {
    /// Creates a new, empty design.
    pub fn new() -> Self {
        Self {
            modules: Arena::new(),
        }
    }

    /// Returns the number of modules in the design.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Looks up a module by name, returning the first declared module with
    /// a matching name if duplicates exist.
    pub fn find_by_name(&self, name: Ident) -> Option<ModuleId> {
        self.modules
            .iter()
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| id)
    }

    /// Builds a name -> ID index over all modules.
    ///
    /// Declaration order is preserved in the arena; this index is purely
    /// for O(1) lookup and does not itself encode ordering.
    pub fn name_index(&self) -> HashMap<Ident, ModuleId> {
        self.modules.iter().map(|(id, m)| (m.name, id)).collect()
    }
}
