//! # Rabbit VM Specification
//!
//! Core types shared by the Rabbit assembler, disassembler and interpreter.
//!
//! ## Key Features
//! - 32-bit words, the machine's only data size
//! - 4-bit opcodes, 16 instructions
//! - 16 registers addressable by 4-bit fields
//! - Register, dereferenced-register and immediate addressing modes
//! - Built-in functions (bifs) callable by integer id
//! - Headerless big-endian program files
//!
//! ## Example
//!
//! ```rust
//! use rabbit_spec::encoding::{decode, encode, Modes};
//! use rabbit_spec::Opcode;
//!
//! let word = encode(Opcode::Add, Modes::NONE, 1, 2, 3);
//! let decoded = decode(word);
//! assert_eq!(decoded.opcode(), Some(Opcode::Add));
//! assert_eq!((decoded.rega, decoded.regb, decoded.regc), (1, 2, 3));
//! ```

pub mod bif;
pub mod encoding;
pub mod error;
pub mod opcode;
pub mod program;
pub mod register;

pub use bif::{Bif, BIF_TABLE};
pub use encoding::{DecodedInstruction, Modes};
pub use error::RabbitError;
pub use opcode::{InstrInfo, Opcode, INSTRUCTION_TABLE};
pub use program::Program;
pub use register::{Register, NUM_REGISTERS, ZERO_FLAG};

/// Machine word
pub type Word = u32;

/// Words of stack reserved above the loaded program
pub const DEFAULT_STACK_WORDS: usize = 1000;
