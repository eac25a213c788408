//! Register file
//!
//! Sixteen word slots, one per 4-bit register field. No register is
//! hardwired: `zero` is an ordinary slot and `ip` is written by branches and
//! by any instruction that names it as a destination.

use rabbit_spec::{Register, Word, NUM_REGISTERS, ZERO_FLAG};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [Word; NUM_REGISTERS],
}

impl RegisterFile {
    /// All registers zero
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, reg: Register) -> Word {
        self.regs[reg.index()]
    }

    #[inline]
    pub fn write(&mut self, reg: Register, value: Word) {
        self.regs[reg.index()] = value;
    }

    #[inline]
    pub fn ip(&self) -> Word {
        self.read(Register::IP)
    }

    #[inline]
    pub fn set_ip(&mut self, value: Word) {
        self.write(Register::IP, value);
    }

    pub fn zero_flag(&self) -> bool {
        self.read(Register::FLAGS) & ZERO_FLAG != 0
    }

    /// Set the zero flag; other flag bits are untouched
    pub fn set_zero_flag(&mut self) {
        self.regs[Register::FLAGS.index()] |= ZERO_FLAG;
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}
