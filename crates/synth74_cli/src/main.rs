//! synth74 CLI — the command-line interface for the synth74 HDL-to-PCB
//! synthesis toolchain.
//!
//! Takes a single HDL source file through the full pipeline — parse,
//! synthesize, pack into 74xx ICs, resolve nets — and writes the resulting
//! netlist document to a file or stdout.

#![warn(missing_docs)]

mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::Parser;

/// synth74 — gate-level HDL synthesis targeting discrete 74xx logic ICs.
#[derive(Parser, Debug)]
#[command(name = "synth74", version, about = "HDL-to-PCB gate-level synthesis")]
pub struct Cli {
    /// HDL source file to synthesize.
    pub source: PathBuf,

    /// Output file path. Defaults to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the JSON IR instead of the s-expression netlist.
    #[arg(long)]
    pub json: bool,

    /// Print per-stage progress messages to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a `synth74.toml` configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = pipeline::run(&cli);

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_source_only() {
        let cli = Cli::parse_from(["synth74", "top.hdl"]);
        assert_eq!(cli.source, PathBuf::from("top.hdl"));
        assert!(cli.output.is_none());
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_with_output() {
        let cli = Cli::parse_from(["synth74", "top.hdl", "-o", "top.net"]);
        assert_eq!(cli.output, Some(PathBuf::from("top.net")));
    }

    #[test]
    fn parse_json_flag() {
        let cli = Cli::parse_from(["synth74", "top.hdl", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn parse_verbose_flag() {
        let cli = Cli::parse_from(["synth74", "top.hdl", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["synth74", "top.hdl", "--config", "synth74.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("synth74.toml")));
    }

    #[test]
    fn parse_long_output_flag() {
        let cli = Cli::parse_from(["synth74", "top.hdl", "--output", "out.net"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.net")));
    }
}
