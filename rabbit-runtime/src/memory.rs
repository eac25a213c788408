//! Memory subsystem
//!
//! Flat word-addressed memory: the program image at address 0 followed by a
//! zeroed stack reserve. The size is fixed at construction and every access
//! is bounds-checked.

use rabbit_spec::Word;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    words: Vec<Word>,
}

impl Memory {
    /// Load a program image and reserve `stack_words` zeroed words after it
    pub fn new(code: Vec<Word>, stack_words: usize) -> Self {
        let mut words = code;
        words.resize(words.len() + stack_words, 0);
        Memory { words }
    }

    /// Size in words
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Read a word; `None` when out of bounds
    #[inline]
    pub fn load(&self, address: Word) -> Option<Word> {
        self.words.get(address as usize).copied()
    }

    /// Write a word; `None` when out of bounds
    #[inline]
    pub fn store(&mut self, address: Word, value: Word) -> Option<()> {
        let slot = self.words.get_mut(address as usize)?;
        *slot = value;
        Some(())
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }
}
