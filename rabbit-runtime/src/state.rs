//! Machine run state and faults

use rabbit_spec::Word;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process exit code for a halted machine
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit code for general failures
pub const EXIT_FAILURE: i32 = 1;
/// Process exit code for an illegal operation (divide by zero)
pub const EXIT_ILLEGAL_OPERATION: i32 = 2;
/// Process exit code for an illegal instruction
pub const EXIT_ILLEGAL_INSTRUCTION: i32 = 3;

/// Run state of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineState {
    Running,
    Halted,
    Failed(Fault),
}

impl MachineState {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, MachineState::Running)
    }

    /// Exit code for a terminal state; `None` while running
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            MachineState::Running => None,
            MachineState::Halted => Some(EXIT_SUCCESS),
            MachineState::Failed(fault) => Some(fault.exit_code()),
        }
    }
}

/// Reason a machine stopped in `Failed`
///
/// `ip` is always the address of the faulting instruction's codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Fault {
    /// Opcode with no semantics; every 4-bit opcode is currently defined
    #[error("illegal instruction {word:#010x} at {ip:#x}")]
    IllegalInstruction { ip: Word, word: Word },

    #[error("illegal operation (division by zero) at {ip:#x}")]
    IllegalOperation { ip: Word },

    #[error("invalid bif id {id} at {ip:#x}")]
    InvalidBif { ip: Word, id: Word },

    #[error("memory access out of bounds: address {address:#x} at {ip:#x}")]
    MemoryOutOfBounds { ip: Word, address: Word },
}

impl Fault {
    pub fn exit_code(&self) -> i32 {
        match self {
            Fault::IllegalInstruction { .. } => EXIT_ILLEGAL_INSTRUCTION,
            Fault::IllegalOperation { .. } => EXIT_ILLEGAL_OPERATION,
            Fault::InvalidBif { .. } | Fault::MemoryOutOfBounds { .. } => EXIT_FAILURE,
        }
    }

    /// Address of the faulting instruction
    pub fn ip(&self) -> Word {
        match *self {
            Fault::IllegalInstruction { ip, .. }
            | Fault::IllegalOperation { ip }
            | Fault::InvalidBif { ip, .. }
            | Fault::MemoryOutOfBounds { ip, .. } => ip,
        }
    }
}
