//! Instruction execution
//!
//! Operand resolution is shared by every opcode. Three-operand forms
//! locate the destination first, then source B, then source C (which may
//! pull the immediate word from `memory[ip]`). `move` fetches its source
//! before locating the destination, so a destination based on `ip` sees
//! the advanced value.

use std::io::{self, Read, Write};

use rabbit_spec::encoding::{decode, DecodedInstruction};
use rabbit_spec::{Bif, Opcode, Register, Word};

use crate::bif::{self, BifContext};
use crate::io::IOHandler;
use crate::memory::Memory;
use crate::register_state::RegisterFile;
use crate::state::Fault;

/// Effect of one instruction on the run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Halt,
}

/// Why an instruction did not complete
#[derive(Debug)]
pub enum Trap {
    /// The program did something illegal
    Fault(Fault),
    /// The host stream failed
    Io(io::Error),
}

impl From<Fault> for Trap {
    fn from(fault: Fault) -> Self {
        Trap::Fault(fault)
    }
}

impl From<io::Error> for Trap {
    fn from(err: io::Error) -> Self {
        Trap::Io(err)
    }
}

/// Where a result is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Register(Register),
    Memory(Word),
}

/// Operand resolver for one instruction
struct Operands<'a> {
    registers: &'a mut RegisterFile,
    memory: &'a mut Memory,
    instr: DecodedInstruction,
    ip: Word,
}

impl Operands<'_> {
    fn load(&self, address: Word) -> Result<Word, Fault> {
        self.memory
            .load(address)
            .ok_or(Fault::MemoryOutOfBounds { ip: self.ip, address })
    }

    /// Register itself, or the memory word it points at
    fn destination(&self, field: u8, deref: bool) -> Destination {
        let reg = Register::from_field(field);
        if deref {
            Destination::Memory(self.registers.read(reg))
        } else {
            Destination::Register(reg)
        }
    }

    fn source_b(&self) -> Result<Word, Fault> {
        let raw = self.registers.read(Register::from_field(self.instr.regb));
        if self.instr.modes.regb_deref {
            self.load(raw)
        } else {
            Ok(raw)
        }
    }

    /// Immediate or register C, optionally dereferenced
    fn source_c(&mut self) -> Result<Word, Fault> {
        let raw = if self.instr.modes.immediate {
            let address = self.registers.ip();
            let value = self.load(address)?;
            self.registers.set_ip(address.wrapping_add(1));
            value
        } else {
            self.registers.read(Register::from_field(self.instr.regc))
        };

        if self.instr.modes.regc_deref {
            self.load(raw)
        } else {
            Ok(raw)
        }
    }

    fn write(&mut self, dst: Destination, value: Word) -> Result<(), Fault> {
        match dst {
            Destination::Register(reg) => {
                self.registers.write(reg, value);
                Ok(())
            }
            Destination::Memory(address) => self
                .memory
                .store(address, value)
                .ok_or(Fault::MemoryOutOfBounds { ip: self.ip, address }),
        }
    }
}

/// Arithmetic and logic; `None` on division by zero
fn alu(opcode: Opcode, b: Word, c: Word) -> Option<Word> {
    let value = match opcode {
        Opcode::Add => b.wrapping_add(c),
        Opcode::Sub => b.wrapping_sub(c),
        Opcode::Mul => b.wrapping_mul(c),
        Opcode::Div => return b.checked_div(c),
        // shift amount taken mod 32
        Opcode::Shr => b.wrapping_shr(c),
        Opcode::Shl => b.wrapping_shl(c),
        Opcode::Nand => !(b & c),
        Opcode::Xor => b ^ c,
        _ => unreachable!("{} is not an ALU opcode", opcode),
    };
    Some(value)
}

/// Execute the instruction `word`, fetched from address `ip`
///
/// The instruction pointer register must already point past the codeword.
pub fn execute<R: Read, W: Write>(
    word: Word,
    ip: Word,
    registers: &mut RegisterFile,
    memory: &mut Memory,
    io: &mut IOHandler<R, W>,
) -> Result<Control, Trap> {
    let instr = decode(word);
    let opcode = instr
        .opcode()
        .ok_or(Fault::IllegalInstruction { ip, word })?;
    let mut ops = Operands {
        registers,
        memory,
        instr,
        ip,
    };

    match opcode {
        Opcode::Halt => return Ok(Control::Halt),

        Opcode::Move => {
            let value = ops.source_c()?;
            let dst = ops.destination(instr.regb, instr.modes.regb_deref);
            ops.write(dst, value)?;
        }

        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::Div
        | Opcode::Shr
        | Opcode::Shl
        | Opcode::Nand
        | Opcode::Xor => {
            let dst = ops.destination(instr.rega, instr.modes.rega_deref);
            let b = ops.source_b()?;
            let c = ops.source_c()?;
            let value = alu(opcode, b, c).ok_or(Fault::IllegalOperation { ip })?;
            ops.write(dst, value)?;
            if opcode == Opcode::Sub && value == 0 {
                ops.registers.set_zero_flag();
            }
        }

        Opcode::Br => {
            let target = ops.source_c()?;
            ops.registers.set_ip(target);
        }

        // operand is consumed whether or not the branch is taken
        Opcode::Brz | Opcode::Brnz => {
            let target = ops.source_c()?;
            let zero = ops.registers.zero_flag();
            let taken = if opcode == Opcode::Brz { !zero } else { zero };
            if taken {
                ops.registers.set_ip(target);
            }
        }

        // immediate flag is ignored; no word is consumed
        Opcode::In => {
            let dst = ops.destination(instr.regc, instr.modes.regc_deref);
            let value = io.read_byte()?.map_or(Word::MAX, Word::from);
            ops.write(dst, value)?;
        }

        Opcode::Out => {
            let value = ops.source_c()?;
            io.write_byte(value as u8)?;
        }

        Opcode::Bif => {
            let id = ops.source_c()?;
            let bif = Bif::from_id(id).ok_or(Fault::InvalidBif { ip, id })?;
            tracing::debug!(ip, bif = bif.name(), "calling bif");

            let mut ctx = BifContext {
                registers: &mut *ops.registers,
                memory: &mut *ops.memory,
                io,
            };
            bif::call(bif, &mut ctx)?;
        }
    }

    Ok(Control::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rabbit_spec::encoding::{encode, Modes};

    const IMM: Modes = Modes {
        immediate: true,
        ..Modes::NONE
    };

    struct Machine {
        registers: RegisterFile,
        memory: Memory,
        io: IOHandler<&'static [u8], Vec<u8>>,
    }

    impl Machine {
        fn new(code: Vec<Word>, input: &'static [u8]) -> Self {
            Machine {
                registers: RegisterFile::new(),
                memory: Memory::new(code, 16),
                io: IOHandler::new(input, Vec::new()),
            }
        }

        /// Fetch and execute the instruction at ip
        fn step(&mut self) -> Result<Control, Trap> {
            let ip = self.registers.ip();
            let word = self.memory.load(ip).unwrap();
            self.registers.set_ip(ip + 1);
            execute(word, ip, &mut self.registers, &mut self.memory, &mut self.io)
        }

        fn reg(&self, index: usize) -> Word {
            self.registers.read(Register::from_index(index).unwrap())
        }
    }

    fn fault(result: Result<Control, Trap>) -> Fault {
        match result {
            Err(Trap::Fault(fault)) => fault,
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_halt() {
        let mut m = Machine::new(vec![0], b"");
        assert_eq!(m.step().unwrap(), Control::Halt);
    }

    #[test]
    fn test_alu_semantics() {
        assert_eq!(alu(Opcode::Add, u32::MAX, 2), Some(1));
        assert_eq!(alu(Opcode::Sub, 0, 1), Some(u32::MAX));
        assert_eq!(alu(Opcode::Mul, 0x1_0000, 0x1_0000), Some(0));
        assert_eq!(alu(Opcode::Div, 7, 2), Some(3));
        assert_eq!(alu(Opcode::Div, 7, 0), None);
        assert_eq!(alu(Opcode::Shr, 0x80, 4), Some(0x8));
        assert_eq!(alu(Opcode::Shl, 1, 33), Some(2));
        assert_eq!(alu(Opcode::Nand, 0xFF, 0x0F), Some(0xFFFF_FFF0));
        assert_eq!(alu(Opcode::Xor, 0b1100, 0b1010), Some(0b0110));
    }

    #[test]
    fn test_add_immediate_advances_ip_by_two() {
        let mut m = Machine::new(vec![encode(Opcode::Add, IMM, 1, 2, 0), 5], b"");
        m.registers.write(Register::R2, 3);
        assert_eq!(m.step().unwrap(), Control::Continue);
        assert_eq!(m.reg(1), 8);
        assert_eq!(m.registers.ip(), 2);
    }

    #[test]
    fn test_sub_sets_zero_flag_only_on_zero() {
        let mut m = Machine::new(
            vec![
                encode(Opcode::Sub, Modes::NONE, 1, 2, 3),
                encode(Opcode::Sub, Modes::NONE, 1, 2, 2),
            ],
            b"",
        );
        m.registers.write(Register::R2, 5);
        m.registers.write(Register::R3, 1);
        m.step().unwrap();
        assert!(!m.registers.zero_flag());
        m.step().unwrap();
        assert_eq!(m.reg(1), 0);
        assert!(m.registers.zero_flag());
    }

    #[test]
    fn test_div_by_zero_leaves_destination() {
        let mut m = Machine::new(vec![encode(Opcode::Div, IMM, 1, 2, 0), 0], b"");
        m.registers.write(Register::R1, 77);
        assert_eq!(fault(m.step()), Fault::IllegalOperation { ip: 0 });
        assert_eq!(m.reg(1), 77);
    }

    #[test]
    fn test_move_through_memory() {
        let modes = Modes {
            regb_deref: true,
            regc_deref: true,
            ..Modes::NONE
        };
        let mut m = Machine::new(vec![encode(Opcode::Move, modes, 0, 3, 4)], b"");
        m.memory.store(10, 0xCAFE).unwrap();
        m.registers.write(Register::R3, 12);
        m.registers.write(Register::R4, 10);
        m.step().unwrap();
        assert_eq!(m.memory.load(12), Some(0xCAFE));
    }

    #[test]
    fn test_move_resolves_destination_after_immediate() {
        let modes = Modes {
            immediate: true,
            regb_deref: true,
            ..Modes::NONE
        };
        let mut m = Machine::new(
            vec![encode(Opcode::Move, modes, 0, Register::IP.index() as u32, 0), 7, 0],
            b"",
        );
        m.step().unwrap();
        assert_eq!(m.memory.load(1), Some(7));
        assert_eq!(m.memory.load(2), Some(7));
        assert_eq!(m.registers.ip(), 2);
    }

    #[test]
    fn test_dereferenced_immediate() {
        let modes = Modes {
            immediate: true,
            regc_deref: true,
            ..Modes::NONE
        };
        let mut m = Machine::new(vec![encode(Opcode::Move, modes, 0, 1, 0), 1], b"");
        m.step().unwrap();
        // memory[1] is the immediate word itself
        assert_eq!(m.reg(1), 1);
    }

    #[test]
    fn test_store_out_of_bounds() {
        let modes = Modes {
            rega_deref: true,
            ..Modes::NONE
        };
        let mut m = Machine::new(vec![encode(Opcode::Xor, modes, 1, 2, 3)], b"");
        m.registers.write(Register::R1, 5000);
        assert_eq!(
            fault(m.step()),
            Fault::MemoryOutOfBounds { ip: 0, address: 5000 }
        );
    }

    #[test]
    fn test_branch_consumes_immediate_when_not_taken() {
        let mut m = Machine::new(vec![encode(Opcode::Brnz, IMM, 0, 0, 0), 9, 0], b"");
        m.step().unwrap();
        assert_eq!(m.registers.ip(), 2);
    }

    #[test]
    fn test_in_and_out() {
        let mut m = Machine::new(
            vec![
                encode(Opcode::In, Modes::NONE, 0, 0, 1),
                encode(Opcode::Out, Modes::NONE, 0, 0, 1),
                encode(Opcode::In, Modes::NONE, 0, 0, 2),
            ],
            b"Z",
        );
        m.step().unwrap();
        assert_eq!(m.reg(1), b'Z' as Word);
        m.step().unwrap();
        assert_eq!(m.io.output(), b"Z");
        m.step().unwrap();
        assert_eq!(m.reg(2), Word::MAX);
    }

    #[test]
    fn test_in_ignores_immediate_flag() {
        let mut m = Machine::new(vec![encode(Opcode::In, IMM, 0, 0, 4), 3], b"x");
        assert_eq!(m.step().unwrap(), Control::Continue);
        assert_eq!(m.reg(4), b'x' as Word);
        assert_eq!(m.registers.ip(), 1);
    }

    #[test]
    fn test_bif_range() {
        let mut m = Machine::new(vec![encode(Opcode::Bif, IMM, 0, 0, 0), 1], b"");
        assert_eq!(fault(m.step()), Fault::InvalidBif { ip: 0, id: 1 });

        let mut m = Machine::new(vec![encode(Opcode::Bif, IMM, 0, 0, 0), 0], b"");
        assert_eq!(m.step().unwrap(), Control::Continue);
        assert_eq!(m.io.output(), b"hello\n");
    }
}
