//! Built-in function (bif) table
//!
//! Bifs are host routines callable from machine code by integer id. The
//! table is closed: ids outside it are rejected by the interpreter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Word;

/// Built-in function identifier
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bif {
    /// Print a fixed greeting
    Hello = 0,
}

/// Bif table, indexed by id
pub const BIF_TABLE: [Bif; Bif::COUNT] = [Bif::Hello];

impl Bif {
    /// Number of defined bifs
    pub const COUNT: usize = 1;

    /// Look up a bif by id; `id >= COUNT` is invalid
    pub fn from_id(id: Word) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| BIF_TABLE.get(i).copied())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BIF_TABLE.iter().copied().find(|bif| bif.name() == name)
    }

    #[inline]
    pub const fn id(self) -> Word {
        self as Word
    }

    pub const fn name(self) -> &'static str {
        match self {
            Bif::Hello => "hello",
        }
    }
}

impl fmt::Display for Bif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())
    }
}
