//! Command-line entry point for the iconscript compiler.
//!
//! Reads one or more scripts (files, an inline string, or stdin), compiles
//! every icon to path-data and writes one SVG file per icon.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};

use iconscript::{compile, svg};

#[derive(Parser)]
#[command(name = "iconscript")]
#[command(about = "Compile iconscript files into SVG icons")]
struct Cli {
    /// Input script files (reads stdin when no inputs and no --command)
    #[arg(short, long = "input")]
    inputs: Vec<PathBuf>,

    /// Inline script text instead of input files
    #[arg(short, long)]
    command: Option<String>,

    /// Output directory for the generated SVG files
    #[arg(short, long, default_value = "icons")]
    output: PathBuf,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let mut sources: Vec<(String, String)> = Vec::new();
    if let Some(script) = cli.command {
        sources.push(("<command>".to_string(), script));
    }
    for path in &cli.inputs {
        let text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read `{}`", path.display()))?;
        sources.push((path.display().to_string(), text));
    }
    if sources.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .into_diagnostic()
            .wrap_err("failed to read from stdin")?;
        sources.push(("<stdin>".to_string(), buffer));
    }

    let mut total = 0;
    for (name, source) in &sources {
        let icons =
            compile(source).wrap_err_with(|| format!("failed to compile `{name}`"))?;
        total += svg::write_icons(&cli.output, &icons)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write icons from `{name}`"))?;
    }
    eprintln!("wrote {} icon(s) to `{}`", total, cli.output.display());
    Ok(())
}
