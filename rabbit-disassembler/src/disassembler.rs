//! Main disassembler logic

use rabbit_spec::Program;

use crate::decoder::Decoder;
use crate::error::Result;
use crate::formatter::format;

/// Disassemble a program into an annotated listing
///
/// One line per instruction: word address, codeword, assembly text.
pub fn disassemble(program: &Program) -> Result<String> {
    let mut output = String::new();

    for instr in Decoder::new(&program.code) {
        let instr = instr?;
        let text = format(&instr)?;
        tracing::debug!(address = instr.address, immediate = ?instr.immediate, "{}", text);

        output.push_str(&format!("{:08x}:  {:08x}  {}\n", instr.address, instr.word, text));
    }

    Ok(output)
}

/// Disassemble a program into plain assembly source
pub fn disassemble_to_source(program: &Program) -> Result<String> {
    let mut output = String::new();

    for instr in Decoder::new(&program.code) {
        output.push_str(&format(&instr?)?);
        output.push('\n');
    }

    Ok(output)
}
