//! Rabbit Assembler
//!
//! Assemble Rabbit assembly language into a binary word stream.
//!
//! ## Syntax
//!
//! One instruction per line; operands are separated by whitespace and
//! optional commas. `;` and `#` start a comment.
//!
//! ```text
//! add r1, r2, $5      ; r1 = r2 + 5
//! move (r3), r1       ; mem[r3] = r1
//! bif @hello
//! halt
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rabbit_assembler::assemble;
//!
//! let source = r#"
//!     out $72
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 3);
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;

pub use assembler::{assemble, assemble_file};
pub use encoder::{encode, EncodedInstruction};
pub use error::{AssemblerError, Result};
pub use parser::{parse_instruction, parse_line, Operand, OperandValue, ParsedInstruction};
