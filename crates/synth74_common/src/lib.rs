//! Shared foundational types used across the synth74 HDL-to-PCB toolchain.
//!
//! This crate provides core types including interned identifiers and the
//! common result/error types used by every pipeline stage.

#![warn(missing_docs)]

pub mod ident;
pub mod result;
pub mod sanitize;

pub use ident::{Ident, Interner};
pub use result::{InternalError, Synth74Result};
pub use sanitize::{is_range_select, sanitize_signal_name};
