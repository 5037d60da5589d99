//! Parsing of `synth74.toml` project configuration files.
//!
//! This crate reads an optional project configuration file and produces a
//! strongly-typed [`ProjectConfig`] covering the two knobs this toolchain
//! exposes: a top-module override and the netlist output format.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{OutputFormat, ProjectConfig};
