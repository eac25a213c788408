//! Disassembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Truncated program: instruction at word {address} is missing its immediate word")]
    Truncated { address: usize },

    #[error("Unknown opcode: 0x{0:X}")]
    UnknownOpcode(u8),

    #[error("Unknown bif id {id} at word {address}")]
    UnknownBif { address: usize, id: u32 },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
