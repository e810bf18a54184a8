//! `jayl` CLI — validate and reformat JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Reformat with 4-space indentation (stdin → stdout)
//! echo '{"name":"Ada","scores":[95,87]}' | jayl fmt
//!
//! # Reformat from file to file, compact
//! jayl fmt --compact -i data.json -o data.min.json
//!
//! # Pick an indent width
//! jayl fmt --indent 2 -i data.json
//!
//! # Check validity; diagnostics name the byte offset
//! jayl verify -i data.json
//! echo '[1,2,' | jayl verify
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(name = "jayl", version, about = "JSON validation and formatting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reformat a JSON document
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent width for pretty output
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Emit compact output with no whitespace
        #[arg(long, conflicts_with = "indent")]
        compact: bool,
    },
    /// Check that a document is valid JSON
    Verify {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Print nothing on success
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt {
            input,
            output,
            indent,
            compact,
        } => {
            let bytes = read_input(input.as_deref())?;
            let value = jayl_core::loads(&bytes).context("Failed to parse JSON input")?;
            let indent = if compact { None } else { Some(indent) };
            let formatted =
                jayl_core::dumps_indent(&value, indent).context("Failed to format the document")?;
            write_output(output.as_deref(), &formatted)?;
        }
        Commands::Verify { input, quiet } => {
            let bytes = read_input(input.as_deref())?;
            jayl_core::loads(&bytes).context("Failed to parse JSON input")?;
            if !quiet {
                println!("OK: {} bytes of valid JSON", bytes.len());
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            io::stdout()
                .write_all(content)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
