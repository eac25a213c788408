//! Instruction decoder
//!
//! Walks a word stream one instruction at a time. An instruction is its
//! codeword plus, when the immediate flag is set and the opcode reads an
//! immediate, the word that follows.

use rabbit_spec::encoding::{decode as decode_word, DecodedInstruction};
use rabbit_spec::{Opcode, Word};

use crate::error::{DisassemblerError, Result};

/// One instruction recovered from the stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Word address of the codeword
    pub address: usize,
    pub word: Word,
    pub decoded: DecodedInstruction,
    pub opcode: Opcode,
    /// Trailing immediate word, if consumed
    pub immediate: Option<Word>,
}

impl DisassembledInstruction {
    /// Words occupied in the stream
    pub fn len(&self) -> usize {
        1 + self.immediate.is_some() as usize
    }
}

/// Decode the instruction starting at `address`
pub fn decode(words: &[Word], address: usize) -> Result<DisassembledInstruction> {
    let word = *words
        .get(address)
        .ok_or(DisassemblerError::Truncated { address })?;
    let decoded = decode_word(word);
    let opcode = decoded
        .opcode()
        .ok_or(DisassemblerError::UnknownOpcode(decoded.opcode))?;

    let immediate = if decoded.has_immediate() && opcode.accepts_immediate() {
        let value = words
            .get(address + 1)
            .copied()
            .ok_or(DisassemblerError::Truncated { address })?;
        Some(value)
    } else {
        None
    };

    Ok(DisassembledInstruction {
        address,
        word,
        decoded,
        opcode,
        immediate,
    })
}

/// Iterator over every instruction in a word stream
///
/// Stops after the first error.
pub struct Decoder<'a> {
    words: &'a [Word],
    pos: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        Decoder {
            words,
            pos: 0,
            failed: false,
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<DisassembledInstruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.words.len() {
            return None;
        }
        match decode(self.words, self.pos) {
            Ok(instr) => {
                self.pos += instr.len();
                Some(Ok(instr))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
