//! Register definitions for the Rabbit VM

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of registers (every 4-bit register field is addressable)
pub const NUM_REGISTERS: usize = 16;

/// Zero flag bit in the flags register
pub const ZERO_FLAG: u32 = 0x2;

/// Register (r0-r15)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    R0 = 0,   // zero  - general purpose, not hardwired
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10, // ip    - instruction pointer
    R11 = 11, // sp    - stack pointer
    R12 = 12, // ret   - return value
    R13 = 13, // tmp   - temporary
    R14 = 14, // flags - status flags
    R15 = 15, // scratch
}

impl Register {
    pub const ZERO: Self = Self::R0;
    pub const IP: Self = Self::R10;
    pub const SP: Self = Self::R11;
    pub const RET: Self = Self::R12;
    pub const TMP: Self = Self::R13;
    pub const FLAGS: Self = Self::R14;

    const ALL: [Register; NUM_REGISTERS] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Register named by the low 4 bits of a codeword field
    #[inline]
    pub fn from_field(field: u8) -> Self {
        Self::ALL[(field & 0xF) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::R0 => "zero",
            Self::R1 => "r1",
            Self::R2 => "r2",
            Self::R3 => "r3",
            Self::R4 => "r4",
            Self::R5 => "r5",
            Self::R6 => "r6",
            Self::R7 => "r7",
            Self::R8 => "r8",
            Self::R9 => "r9",
            Self::R10 => "ip",
            Self::R11 => "sp",
            Self::R12 => "ret",
            Self::R13 => "tmp",
            Self::R14 => "flags",
            Self::R15 => "r15",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
