//! # Rabbit Runtime
//!
//! Execute Rabbit programs.
//!
//! The machine is a flat array of 32-bit words holding the program image
//! followed by a stack reserve, sixteen registers, and a pair of byte
//! streams for `in`/`out`. Execution is single-threaded and stops at
//! `halt` or the first fault.
//!
//! ## Features
//!
//! - **16 instructions**: arithmetic, logic, branches, byte I/O, bifs
//! - **16 registers**: r0-r15, with ip, sp, ret, tmp and flags at r10-r14
//! - **Addressing modes**: register, dereferenced register, immediate
//! - **Faults**: illegal instruction, illegal operation, invalid bif,
//!   out-of-bounds memory access
//!
//! ## Example
//!
//! ```rust
//! use rabbit_runtime::{IOHandler, MachineState, VMConfig, VM};
//! use rabbit_spec::Program;
//!
//! // out $72; halt
//! let program = Program::new(vec![0xE800_0000, 72, 0x0000_0000]);
//! let io = IOHandler::new(std::io::empty(), Vec::new());
//! let mut vm = VM::with_io(program, VMConfig::default(), io);
//! let result = vm.run().unwrap();
//! assert_eq!(result.state, MachineState::Halted);
//! assert_eq!(vm.io().output(), b"H");
//! ```

pub mod bif;
pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod register_state;
pub mod state;
pub mod vm;

pub use bif::BifContext;
pub use error::RuntimeError;
pub use io::IOHandler;
pub use memory::Memory;
pub use register_state::RegisterFile;
pub use state::{Fault, MachineState};
pub use vm::{ExecutionResult, VMConfig, VM};

/// Simple execution helper
///
/// Runs a program against an in-memory input and returns the result with
/// everything the program wrote.
pub fn run(
    program: rabbit_spec::Program,
    input: &[u8],
) -> Result<(ExecutionResult, Vec<u8>), RuntimeError> {
    let mut vm = VM::with_io(program, VMConfig::default(), IOHandler::new(input, Vec::new()));
    let result = vm.run()?;
    let (_, output) = vm.into_io().into_parts();
    Ok((result, output))
}
