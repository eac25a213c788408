//! Instruction encoding to Rabbit codewords
//!
//! Every instruction is one codeword, followed by one immediate word when
//! the C operand is an immediate or a bif reference.

use rabbit_spec::encoding::{self, Modes};
use rabbit_spec::Word;

use crate::parser::{Operand, OperandValue, ParsedInstruction};

/// Codeword plus optional trailing immediate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedInstruction {
    pub word: Word,
    pub immediate: Option<Word>,
}

impl EncodedInstruction {
    /// Words in stream order
    pub fn words(&self) -> impl Iterator<Item = Word> {
        std::iter::once(self.word).chain(self.immediate)
    }

    pub fn len(&self) -> usize {
        1 + self.immediate.is_some() as usize
    }
}

/// Encode a parsed instruction
pub fn encode(instr: &ParsedInstruction) -> EncodedInstruction {
    let immediate = match instr.c.value {
        OperandValue::Immediate(value) => Some(value),
        OperandValue::Bif(bif) => Some(bif.id()),
        OperandValue::Register(_) => None,
    };

    let modes = Modes {
        rega_deref: instr.a.deref,
        regb_deref: instr.b.deref,
        regc_deref: instr.c.deref,
        immediate: immediate.is_some(),
    };

    let word = encoding::encode(
        instr.opcode,
        modes,
        register_field(&instr.a),
        register_field(&instr.b),
        register_field(&instr.c),
    );

    EncodedInstruction { word, immediate }
}

/// Register field for a slot; immediate slots leave the field zero
fn register_field(operand: &Operand) -> u32 {
    match operand.value {
        OperandValue::Register(index) => index as u32,
        OperandValue::Immediate(_) | OperandValue::Bif(_) => 0,
    }
}
