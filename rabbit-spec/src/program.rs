//! # Program Structure for Rabbit
//!
//! A program file is a bare sequence of big-endian words: no header, no magic
//! number, no length prefix. Instruction words and their immediate words are
//! interleaved, so the word count is only known by reading to end of file.

use std::fs;
use std::path::Path;

use crate::encoding::{bytes_to_words, words_to_bytes, WORD_BYTES};
use crate::error::RabbitError;
use crate::Word;

/// A loaded or assembled program
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction and immediate words, in stream order
    pub code: Vec<Word>,
}

impl Program {
    pub fn new(code: Vec<Word>) -> Self {
        Program { code }
    }

    /// Number of words in the program
    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Size of the serialized program in bytes
    pub fn byte_len(&self) -> usize {
        self.code.len() * WORD_BYTES
    }

    /// Serialize to the on-disk format
    pub fn to_bytes(&self) -> Vec<u8> {
        words_to_bytes(&self.code)
    }

    /// Deserialize from the on-disk format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RabbitError> {
        Ok(Program::new(bytes_to_words(bytes)?))
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, RabbitError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RabbitError> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

impl From<Vec<Word>> for Program {
    fn from(code: Vec<Word>) -> Self {
        Program::new(code)
    }
}
