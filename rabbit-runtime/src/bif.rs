//! Built-in function dispatch
//!
//! Bifs run host code on behalf of the program. Each handler sees the whole
//! machine through a [`BifContext`] and returns a word, which the `bif`
//! instruction currently discards.

use std::io::{self, Read, Write};

use rabbit_spec::{Bif, Word};

use crate::io::IOHandler;
use crate::memory::Memory;
use crate::register_state::RegisterFile;

/// Machine state visible to a bif
pub struct BifContext<'a, R, W> {
    pub registers: &'a mut RegisterFile,
    pub memory: &'a mut Memory,
    pub io: &'a mut IOHandler<R, W>,
}

/// Invoke a bif
pub fn call<R: Read, W: Write>(bif: Bif, ctx: &mut BifContext<'_, R, W>) -> io::Result<Word> {
    match bif {
        Bif::Hello => hello(ctx),
    }
}

fn hello<R: Read, W: Write>(ctx: &mut BifContext<'_, R, W>) -> io::Result<Word> {
    ctx.io.write_all(b"hello\n")?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello() {
        let mut registers = RegisterFile::new();
        let mut memory = Memory::new(vec![], 0);
        let mut io = IOHandler::new(io::empty(), Vec::new());

        let mut ctx = BifContext {
            registers: &mut registers,
            memory: &mut memory,
            io: &mut io,
        };
        assert_eq!(call(Bif::Hello, &mut ctx).unwrap(), 0);
        assert_eq!(io.output(), b"hello\n");
        assert_eq!(registers, RegisterFile::new());
    }
}
