//! Configuration types deserialized from a project's `synth74.toml`.

use serde::Deserialize;

/// The top-level project configuration.
///
/// Every section is optional; an absent `synth74.toml` is equivalent to
/// every field taking its default.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    /// Project-level overrides.
    #[serde(default)]
    pub project: ProjectSection,
    /// Output formatting overrides.
    #[serde(default)]
    pub output: OutputSection,
}

/// `[project]` section: overrides automatic top-module inference.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectSection {
    /// Forces this module to be treated as the design's top level,
    /// bypassing the declaration-order tie-break.
    pub top_module: Option<String>,
}

/// `[output]` section: chooses the netlist document format.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// The netlist output format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// The netlist document format written by `synth74_netlist`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// S-expression netlist document (default).
    #[default]
    Sexpr,
    /// JSON intermediate representation.
    Json,
}
