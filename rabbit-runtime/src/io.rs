//! Byte-stream I/O for `in`, `out` and bifs

use std::io::{self, ErrorKind, Read, Write};

/// Input and output streams owned by a machine
#[derive(Debug)]
pub struct IOHandler<R, W> {
    input: R,
    output: W,
}

impl IOHandler<io::Stdin, io::Stdout> {
    /// Process standard input and output
    pub fn stdio() -> Self {
        IOHandler::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> IOHandler<R, W> {
    pub fn new(input: R, output: W) -> Self {
        IOHandler { input, output }
    }

    /// Read one byte; `None` at end of input
    ///
    /// Pending output is flushed first so prompts appear before the read
    /// blocks.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.output.flush()?;
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.output.write_all(&[byte])
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.write_all(bytes)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
