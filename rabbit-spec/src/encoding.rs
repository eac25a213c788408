//! # Instruction Encoding Constants and Helpers
//!
//! This module provides the codeword codec shared by the assembler,
//! disassembler and interpreter.
//!
//! ## Instruction Format (32-bit)
//!
//! ```text
//! [opcode:4][modes:4][unused:12][regc:4][regb:4][rega:4]
//!  31    28  27   24  23      12  11   8  7    4  3    0
//! ```
//!
//! Mode nibble, one bit per flag:
//!
//! ```text
//! bit 0: rega_deref   bit 1: regb_deref   bit 2: regc_deref   bit 3: immediate
//! ```
//!
//! When `immediate` is set, the next word in the stream holds the value of
//! the C operand.

use serde::{Deserialize, Serialize};

use crate::error::RabbitError;
use crate::{Opcode, Word};

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 28-31 (4 bits)
pub const OPCODE_SHIFT: u32 = 28;

/// Mode nibble: bits 24-27 (4 bits)
pub const MODES_SHIFT: u32 = 24;

/// C register field: bits 8-11 (4 bits)
pub const REGC_SHIFT: u32 = 8;

/// B register field: bits 4-7 (4 bits)
pub const REGB_SHIFT: u32 = 4;

/// A register field: bits 0-3 (4 bits)
pub const REGA_SHIFT: u32 = 0;

// ============================================================================
// Field Masks
// ============================================================================

pub const OPCODE_MASK: u32 = 0xF;

pub const MODES_MASK: u32 = 0xF;

/// Register field mask (4 bits)
pub const REGISTER_MASK: u32 = 0xF;

// Offsets of each flag inside the mode nibble
pub const REGA_DEREF_BIT: u8 = 1 << 0;
pub const REGB_DEREF_BIT: u8 = 1 << 1;
pub const REGC_DEREF_BIT: u8 = 1 << 2;
pub const IMMEDIATE_BIT: u8 = 1 << 3;

/// Bytes per serialized word
pub const WORD_BYTES: usize = 4;

// ============================================================================
// Mode Flags
// ============================================================================

/// Addressing-mode flags carried in the mode nibble
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modes {
    pub rega_deref: bool,
    pub regb_deref: bool,
    pub regc_deref: bool,
    /// C operand is the following immediate word
    pub immediate: bool,
}

impl Modes {
    pub const NONE: Modes = Modes {
        rega_deref: false,
        regb_deref: false,
        regc_deref: false,
        immediate: false,
    };

    /// Build from the low nibble of `bits`; higher bits are ignored
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Modes {
            rega_deref: bits & REGA_DEREF_BIT != 0,
            regb_deref: bits & REGB_DEREF_BIT != 0,
            regc_deref: bits & REGC_DEREF_BIT != 0,
            immediate: bits & IMMEDIATE_BIT != 0,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        let mut bits = 0;
        if self.rega_deref {
            bits |= REGA_DEREF_BIT;
        }
        if self.regb_deref {
            bits |= REGB_DEREF_BIT;
        }
        if self.regc_deref {
            bits |= REGC_DEREF_BIT;
        }
        if self.immediate {
            bits |= IMMEDIATE_BIT;
        }
        bits
    }
}

// ============================================================================
// Decoded Instruction
// ============================================================================

/// Unpacked representation of an instruction word (sans immediate)
///
/// `opcode` holds the raw 4-bit field; use [`DecodedInstruction::opcode`]
/// to resolve it against the instruction table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedInstruction {
    pub opcode: u8,
    pub modes: Modes,
    pub rega: u8,
    pub regb: u8,
    pub regc: u8,
}

impl DecodedInstruction {
    /// Resolve the raw opcode field
    #[inline]
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode)
    }

    /// Whether an immediate word follows this instruction
    #[inline]
    pub const fn has_immediate(&self) -> bool {
        self.modes.immediate
    }
}

// ============================================================================
// Encoding / Decoding
// ============================================================================

/// Pack an instruction word
///
/// Register indices are masked to 4 bits; out-of-range indices wrap silently.
#[inline]
pub const fn encode(opcode: Opcode, modes: Modes, rega: u32, regb: u32, regc: u32) -> Word {
    ((opcode.to_u8() as u32 & OPCODE_MASK) << OPCODE_SHIFT)
        | ((modes.bits() as u32 & MODES_MASK) << MODES_SHIFT)
        | ((regc & REGISTER_MASK) << REGC_SHIFT)
        | ((regb & REGISTER_MASK) << REGB_SHIFT)
        | ((rega & REGISTER_MASK) << REGA_SHIFT)
}

/// Unpack an instruction word
#[inline]
pub const fn decode(word: Word) -> DecodedInstruction {
    DecodedInstruction {
        opcode: extract_opcode(word) as u8,
        modes: Modes::from_bits(extract_modes(word) as u8),
        rega: extract_rega(word) as u8,
        regb: extract_regb(word) as u8,
        regc: extract_regc(word) as u8,
    }
}

/// Extract opcode (bits 28-31)
#[inline]
pub const fn extract_opcode(word: Word) -> u32 {
    (word >> OPCODE_SHIFT) & OPCODE_MASK
}

/// Extract mode nibble (bits 24-27)
#[inline]
pub const fn extract_modes(word: Word) -> u32 {
    (word >> MODES_SHIFT) & MODES_MASK
}

#[inline]
pub const fn extract_rega(word: Word) -> u32 {
    (word >> REGA_SHIFT) & REGISTER_MASK
}

#[inline]
pub const fn extract_regb(word: Word) -> u32 {
    (word >> REGB_SHIFT) & REGISTER_MASK
}

#[inline]
pub const fn extract_regc(word: Word) -> u32 {
    (word >> REGC_SHIFT) & REGISTER_MASK
}

// ============================================================================
// Word Stream Serialization (big-endian)
// ============================================================================

/// Serialize words most-significant byte first
pub fn words_to_bytes(words: &[Word]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Deserialize a big-endian word stream
///
/// A trailing partial word is rejected rather than silently dropped.
pub fn bytes_to_words(bytes: &[u8]) -> Result<Vec<Word>, RabbitError> {
    let chunks = bytes.chunks_exact(WORD_BYTES);
    let remainder = chunks.remainder().len();
    if remainder != 0 {
        return Err(RabbitError::TruncatedWord {
            offset: bytes.len() - remainder,
            len: remainder,
        });
    }

    Ok(chunks
        .map(|c| Word::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_positions() {
        let word = encode(Opcode::Add, Modes::from_bits(0b1010), 1, 2, 3);
        assert_eq!(word, 0x2A00_0321);
    }

    #[test]
    fn test_unused_bits_are_zero() {
        let word = encode(Opcode::Bif, Modes::from_bits(0xF), 0xF, 0xF, 0xF);
        assert_eq!(word & 0x00FF_F000, 0);
        assert_eq!(word, 0xFF00_0FFF);
    }

    #[test]
    fn test_decode_ignores_unused_bits() {
        let word = encode(Opcode::Sub, Modes::NONE, 4, 5, 6) | 0x00AB_C000;
        let decoded = decode(word);
        assert_eq!(decoded.opcode(), Some(Opcode::Sub));
        assert_eq!((decoded.rega, decoded.regb, decoded.regc), (4, 5, 6));
        assert_eq!(decoded.modes, Modes::NONE);
    }

    #[test]
    fn test_register_truncation() {
        let wide = encode(Opcode::Move, Modes::NONE, 17, 18, 33);
        let narrow = encode(Opcode::Move, Modes::NONE, 1, 2, 1);
        assert_eq!(wide, narrow);
    }

    #[test]
    fn test_modes_bits() {
        let modes = Modes {
            regc_deref: true,
            immediate: true,
            ..Modes::NONE
        };
        assert_eq!(modes.bits(), 0b1100);
        assert_eq!(Modes::from_bits(0b1100), modes);
        assert_eq!(Modes::from_bits(0xF3), Modes::from_bits(0x3));
    }

    #[test]
    fn test_words_to_bytes_big_endian() {
        let bytes = words_to_bytes(&[0x1234_5678, 0xA000_0000]);
        assert_eq!(bytes, vec![0x12, 0x34, 0x56, 0x78, 0xA0, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_bytes_to_words() {
        let words = bytes_to_words(&[0x00, 0x00, 0x00, 0x05, 0xF8, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(words, vec![5, 0xF800_0000]);
        assert!(bytes_to_words(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_bytes_to_words_truncated() {
        let err = bytes_to_words(&[0, 0, 0, 1, 0xAA, 0xBB]).unwrap_err();
        assert!(matches!(err, RabbitError::TruncatedWord { offset: 4, len: 2 }));
    }
}
