use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rabbit_runtime::{MachineState, VMConfig, VM};
use rabbit_spec::DEFAULT_STACK_WORDS;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a Rabbit program on standard input and output")]
struct Opts {
    /// Program file
    input: PathBuf,
    /// Words of memory reserved after the program
    #[arg(long, default_value_t = DEFAULT_STACK_WORDS)]
    stack_words: usize,
    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,
}

fn run(opts: &Opts) -> Result<i32> {
    let config = VMConfig {
        stack_words: opts.stack_words,
        trace: opts.trace,
    };
    let mut vm = VM::from_file(&opts.input, config)
        .with_context(|| format!("failed to load {}", opts.input.display()))?;
    let result = vm.run().context("execution aborted")?;

    if let MachineState::Failed(fault) = result.state {
        eprintln!("rabbit: {}", fault);
    }
    Ok(result.exit_status())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    rabbit_cli::init_tracing(if opts.trace { "warn,rabbit_runtime=info" } else { "warn" });

    match run(&opts) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
