//! Instruction formatting to assembly text
//!
//! Output is valid assembler input: operands separated by `, `, derefs in
//! parentheses, immediates as unsigned decimal. The `bif` operand is
//! always printed as `@name`.

use rabbit_spec::{Bif, Opcode, Word};

use crate::decoder::DisassembledInstruction;
use crate::error::{DisassemblerError, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    A,
    B,
    C,
}

/// Operand slots by arity, in source order
fn slots(arity: u8) -> &'static [Slot] {
    match arity {
        0 => &[],
        1 => &[Slot::C],
        2 => &[Slot::B, Slot::C],
        _ => &[Slot::A, Slot::B, Slot::C],
    }
}

/// Format instruction as assembly text
pub fn format(instr: &DisassembledInstruction) -> Result<String> {
    if instr.opcode == Opcode::Bif {
        return format_bif(instr);
    }

    let operands: Vec<String> = slots(instr.opcode.arity())
        .iter()
        .map(|&slot| format_operand(instr, slot))
        .collect();

    if operands.is_empty() {
        Ok(instr.opcode.mnemonic().to_string())
    } else {
        Ok(format!("{} {}", instr.opcode.mnemonic(), operands.join(", ")))
    }
}

/// Bif id comes from the immediate word, or from field A when there is none
fn format_bif(instr: &DisassembledInstruction) -> Result<String> {
    let id = instr
        .immediate
        .unwrap_or_else(|| Word::from(instr.decoded.rega));
    let bif = Bif::from_id(id).ok_or(DisassemblerError::UnknownBif {
        address: instr.address,
        id,
    })?;
    Ok(format!("{} {}", instr.opcode.mnemonic(), bif))
}

fn format_operand(instr: &DisassembledInstruction, slot: Slot) -> String {
    let d = &instr.decoded;
    let (reg, deref) = match slot {
        Slot::A => (d.rega, d.modes.rega_deref),
        Slot::B => (d.regb, d.modes.regb_deref),
        Slot::C => (d.regc, d.modes.regc_deref),
    };

    let text = match instr.immediate {
        Some(value) if slot == Slot::C => format!("${}", value),
        _ => format_reg(reg),
    };

    if deref {
        format!("({})", text)
    } else {
        text
    }
}

fn format_reg(index: u8) -> String {
    format!("r{}", index)
}
