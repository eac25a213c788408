use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rabbit_disassembler::disassemble;
use rabbit_spec::Program;

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble a Rabbit program file")]
struct Opts {
    /// Program file
    input: PathBuf,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    rabbit_cli::init_tracing("warn");

    let program = Program::read_from(&opts.input)
        .with_context(|| format!("failed to read {}", opts.input.display()))?;
    let listing = disassemble(&program)
        .with_context(|| format!("failed to disassemble {}", opts.input.display()))?;

    io::stdout().lock().write_all(listing.as_bytes())?;
    Ok(())
}
