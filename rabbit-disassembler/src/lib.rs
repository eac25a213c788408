//! # Rabbit Disassembler
//!
//! Turn Rabbit program words back into assembly text.
//!
//! [`disassemble`] produces an annotated listing for humans;
//! [`disassemble_to_source`] produces bare source that the assembler
//! accepts and encodes back to the same words.
//!
//! ## Example
//!
//! ```rust
//! use rabbit_spec::Program;
//! use rabbit_disassembler::disassemble_to_source;
//!
//! let program = Program::new(vec![0x2800_0021, 5, 0x0000_0000]);
//! let source = disassemble_to_source(&program).unwrap();
//! assert_eq!(source, "add r1, r2, $5\nhalt\n");
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;

pub use decoder::{decode, DisassembledInstruction, Decoder};
pub use disassembler::{disassemble, disassemble_to_source};
pub use error::{DisassemblerError, Result};
pub use formatter::format;
