//! Virtual Machine for Rabbit

use std::io::{self, Read, Write};
use std::path::Path;

use rabbit_spec::encoding::decode;
use rabbit_spec::{Opcode, Program, Register, Word, DEFAULT_STACK_WORDS};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuntimeError};
use crate::execute::{execute, Control, Trap};
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::register_state::RegisterFile;
use crate::state::{Fault, MachineState, EXIT_FAILURE};

/// VM configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VMConfig {
    /// Words of zeroed memory reserved after the program image
    pub stack_words: usize,

    /// Log every executed instruction at info level
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            stack_words: DEFAULT_STACK_WORDS,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Number of instructions executed, including the last one
    pub steps: u64,

    /// Terminal state, never `Running`
    pub state: MachineState,
}

impl ExecutionResult {
    /// Process exit code for the terminal state
    pub fn exit_status(&self) -> i32 {
        self.state.exit_code().unwrap_or(EXIT_FAILURE)
    }
}

/// Rabbit Virtual Machine
pub struct VM<R = io::Stdin, W = io::Stdout> {
    registers: RegisterFile,
    memory: Memory,
    state: MachineState,
    steps: u64,
    io: IOHandler<R, W>,
    config: VMConfig,
}

impl VM {
    /// Create a VM wired to the process's standard input and output
    pub fn new(program: Program, config: VMConfig) -> Self {
        VM::with_io(program, config, IOHandler::stdio())
    }

    /// Load a program file and create a VM on standard I/O
    pub fn from_file(path: impl AsRef<Path>, config: VMConfig) -> Result<Self> {
        let program = Program::read_from(path)?;
        Ok(VM::new(program, config))
    }
}

impl<R: Read, W: Write> VM<R, W> {
    /// Create a VM with explicit I/O streams
    ///
    /// Memory is the program image followed by `config.stack_words` zeroed
    /// words. IP starts at 0 and SP at the first word past the program.
    pub fn with_io(program: Program, config: VMConfig, io: IOHandler<R, W>) -> Self {
        let program_len = program.len() as Word;
        let memory = Memory::new(program.code, config.stack_words);

        let mut registers = RegisterFile::new();
        registers.write(Register::SP, program_len);

        tracing::debug!(
            program_words = program_len,
            memory_words = memory.len(),
            "machine created"
        );

        VM {
            registers,
            memory,
            state: MachineState::Running,
            steps: 0,
            io,
            config,
        }
    }

    /// Execute exactly one instruction
    pub fn step(&mut self) -> Result<MachineState> {
        if !self.state.is_running() {
            return Err(RuntimeError::NotRunning { state: self.state });
        }

        let ip = self.registers.ip();
        let outcome = match self.memory.load(ip) {
            Some(word) => {
                self.registers.set_ip(ip.wrapping_add(1));
                self.log_step(ip, word);
                execute(word, ip, &mut self.registers, &mut self.memory, &mut self.io)
            }
            None => Err(Trap::Fault(Fault::MemoryOutOfBounds { ip, address: ip })),
        };
        self.steps += 1;

        match outcome {
            Ok(Control::Continue) => {}
            Ok(Control::Halt) => {
                tracing::info!(ip, steps = self.steps, "halted");
                self.state = MachineState::Halted;
            }
            Err(Trap::Fault(fault)) => {
                tracing::warn!(steps = self.steps, %fault, "machine failed");
                self.state = MachineState::Failed(fault);
            }
            Err(Trap::Io(err)) => return Err(err.into()),
        }

        Ok(self.state)
    }

    /// Run until the machine halts or fails
    ///
    /// Loops forever on a program that never halts.
    pub fn run(&mut self) -> Result<ExecutionResult> {
        while self.state.is_running() {
            self.step()?;
        }
        self.io.flush()?;

        Ok(ExecutionResult {
            steps: self.steps,
            state: self.state,
        })
    }

    fn log_step(&self, ip: Word, word: Word) {
        let opcode = decode(word).opcode().map_or("?", Opcode::mnemonic);
        if self.config.trace {
            tracing::info!(
                step = self.steps,
                ip,
                word = format_args!("{:#010x}", word),
                opcode,
                registers = ?self.registers.as_slice(),
                "step"
            );
        } else {
            tracing::trace!(ip, word = format_args!("{:#010x}", word), opcode, "step");
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn io(&self) -> &IOHandler<R, W> {
        &self.io
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    /// Consume the VM, returning its I/O streams
    pub fn into_io(self) -> IOHandler<R, W> {
        self.io
    }
}
