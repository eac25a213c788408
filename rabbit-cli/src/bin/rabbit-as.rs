use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rabbit_assembler::assemble_file;
use rabbit_cli::{default_object_path, init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble Rabbit source into a program file")]
struct Opts {
    /// Assembly source file
    input: PathBuf,
    /// Output program file (default: <input>.o)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_tracing("warn");

    // nothing is written unless the whole file assembles
    let program = assemble_file(&opts.input)
        .with_context(|| format!("failed to assemble {}", opts.input.display()))?;

    let output = opts
        .output
        .unwrap_or_else(|| default_object_path(&opts.input));
    program
        .write_to(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(words = program.len(), output = %output.display(), "wrote program");
    Ok(())
}
