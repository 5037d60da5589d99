//! The full synth74 pipeline: parse, synthesize, pack, resolve, emit.

use std::path::Path;

use synth74_common::Interner;
use synth74_config::{OutputFormat, ProjectConfig};
use synth74_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use synth74_source::SourceDb;

use crate::Cli;

/// Loads project configuration.
///
/// `--config PATH` points directly at a TOML file. Otherwise, looks for a
/// `synth74.toml` next to the source file; an absent file means defaults.
fn load_project_config(cli: &Cli) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let content = std::fs::read_to_string(path)?;
        return Ok(synth74_config::load_config_from_str(&content)?);
    }

    let dir = cli.source.parent().unwrap_or_else(|| Path::new("."));
    if dir.join("synth74.toml").exists() {
        Ok(synth74_config::load_config(dir)?)
    } else {
        Ok(ProjectConfig::default())
    }
}

/// Renders every diagnostic currently on the sink to stderr.
fn render_diagnostics(sink: &DiagnosticSink, source_db: &SourceDb) {
    let renderer = TerminalRenderer::new(false, 80);
    for diag in sink.diagnostics() {
        eprintln!("{}", renderer.render(&diag, source_db));
    }
}

/// Runs the full pipeline for `cli`. Returns the process exit code.
pub fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    if !cli.source.is_file() {
        eprintln!("error: source file not found: {}", cli.source.display());
        return Ok(1);
    }

    let config = load_project_config(cli)?;

    let mut source_db = SourceDb::new();
    let interner = Interner::new();
    let sink = DiagnosticSink::new();

    let file_id = source_db.load_file(&cli.source)?;
    let source_text = source_db.get_file(file_id).content.clone();

    if cli.verbose {
        eprintln!("   Parsing {}", cli.source.display());
    }
    let mut design = match synth74_hdl::parse(&source_text, file_id, &interner, &sink) {
        Ok(design) => design,
        Err(e) => {
            render_diagnostics(&sink, &source_db);
            eprintln!("error: {e}");
            return Ok(1);
        }
    };

    if cli.verbose {
        eprintln!("   Synthesizing {} module(s)", design.module_count());
    }
    let top_override = config.project.top_module.as_deref().map(|name| interner.get_or_intern(name));
    let flattened = match synth74_synth::synthesize(&mut design, &interner, &sink, top_override) {
        Ok(flattened) => flattened,
        Err(e) => {
            render_diagnostics(&sink, &source_db);
            eprintln!("error: {e}");
            return Ok(1);
        }
    };

    if cli.verbose {
        eprintln!("   Packing {} gates", flattened.gates.len());
    }
    let pack_result = synth74_pack::pack(&flattened.gates, &interner)?;

    if cli.verbose {
        eprintln!("   Resolving nets across {} IC(s)", pack_result.ics.len());
    }
    let resolved = synth74_netlist::resolve(&flattened.ports, &pack_result, &interner);

    render_diagnostics(&sink, &source_db);

    let emit_json = cli.json || config.output.format == OutputFormat::Json;
    let top_name = interner.resolve(flattened.name).to_string();
    let document = if emit_json {
        let ir = synth74_netlist::build_module_ir(&top_name, &flattened.ports, &pack_result, &interner);
        serde_json::to_string_pretty(&ir)?
    } else {
        let tool_version = concat!("synth74 ", env!("CARGO_PKG_VERSION"));
        synth74_netlist::render_sexpr(&resolved, &top_name, tool_version, 1)
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &document)?,
        None => println!("{document}"),
    }

    Ok(0)
}
