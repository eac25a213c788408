//! # Rabbit Opcode Definitions
//!
//! This module defines the opcode values and the instruction table for all
//! Rabbit instructions. Opcodes are 4 bits (0x0-0xF) and every value is
//! assigned a mnemonic.
//!
//! ## Operand Roles
//!
//! Operands bind positionally to the A, B and C slots of the codeword:
//! - arity 0: no operands
//! - arity 1: C
//! - arity 2: B, C
//! - arity 3: A, B, C

use serde::{Deserialize, Serialize};

/// Instruction opcode (4 bits, values 0x0-0xF)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// HALT: stop the machine
    Halt = 0x0,
    /// MOVE: B = C
    Move = 0x1,
    /// ADD: A = B + C
    Add = 0x2,
    /// SUB: A = B - C, sets the zero flag on a zero result
    Sub = 0x3,
    /// MUL: A = B * C
    Mul = 0x4,
    /// DIV: A = B / C (unsigned)
    Div = 0x5,
    /// SHR: A = B >> C
    Shr = 0x6,
    /// SHL: A = B << C
    Shl = 0x7,
    /// NAND: A = !(B & C)
    Nand = 0x8,
    /// XOR: A = B ^ C
    Xor = 0x9,
    /// BR: IP = C
    Br = 0xA,
    /// BRZ: IP = C if the zero flag is clear
    Brz = 0xB,
    /// BRNZ: IP = C if the zero flag is set
    Brnz = 0xC,
    /// IN: C = byte from input
    In = 0xD,
    /// OUT: byte C to output
    Out = 0xE,
    /// BIF: call built-in function C
    Bif = 0xF,
}

/// Instruction table entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrInfo {
    pub opcode: Opcode,
    pub mnemonic: &'static str,
    pub arity: u8,
}

/// Instruction table, indexed by opcode value
pub const INSTRUCTION_TABLE: [InstrInfo; Opcode::COUNT] = [
    InstrInfo { opcode: Opcode::Halt, mnemonic: "halt", arity: 0 },
    InstrInfo { opcode: Opcode::Move, mnemonic: "move", arity: 2 },
    InstrInfo { opcode: Opcode::Add, mnemonic: "add", arity: 3 },
    InstrInfo { opcode: Opcode::Sub, mnemonic: "sub", arity: 3 },
    InstrInfo { opcode: Opcode::Mul, mnemonic: "mul", arity: 3 },
    InstrInfo { opcode: Opcode::Div, mnemonic: "div", arity: 3 },
    InstrInfo { opcode: Opcode::Shr, mnemonic: "shr", arity: 3 },
    InstrInfo { opcode: Opcode::Shl, mnemonic: "shl", arity: 3 },
    InstrInfo { opcode: Opcode::Nand, mnemonic: "nand", arity: 3 },
    InstrInfo { opcode: Opcode::Xor, mnemonic: "xor", arity: 3 },
    InstrInfo { opcode: Opcode::Br, mnemonic: "br", arity: 1 },
    InstrInfo { opcode: Opcode::Brz, mnemonic: "brz", arity: 1 },
    InstrInfo { opcode: Opcode::Brnz, mnemonic: "brnz", arity: 1 },
    InstrInfo { opcode: Opcode::In, mnemonic: "in", arity: 1 },
    InstrInfo { opcode: Opcode::Out, mnemonic: "out", arity: 1 },
    InstrInfo { opcode: Opcode::Bif, mnemonic: "bif", arity: 1 },
];

impl Opcode {
    /// Number of defined opcodes
    pub const COUNT: usize = 16;

    /// All opcodes in table order
    pub const ALL: [Opcode; Opcode::COUNT] = [
        Opcode::Halt,
        Opcode::Move,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Shr,
        Opcode::Shl,
        Opcode::Nand,
        Opcode::Xor,
        Opcode::Br,
        Opcode::Brz,
        Opcode::Brnz,
        Opcode::In,
        Opcode::Out,
        Opcode::Bif,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Look up an opcode by its mnemonic (case-insensitive)
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        INSTRUCTION_TABLE
            .iter()
            .find(|info| info.mnemonic.eq_ignore_ascii_case(mnemonic))
            .map(|info| info.opcode)
    }

    /// Instruction table entry for this opcode
    #[inline]
    pub const fn info(self) -> InstrInfo {
        INSTRUCTION_TABLE[self as usize]
    }

    #[inline]
    pub const fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Number of operands taken by the assembly form
    #[inline]
    pub const fn arity(self) -> u8 {
        self.info().arity
    }

    /// Check if the C operand of this opcode may be an immediate
    ///
    /// `in` writes to its C operand, so it has no immediate form.
    #[inline]
    pub const fn accepts_immediate(self) -> bool {
        self.arity() > 0 && !matches!(self, Opcode::In)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
