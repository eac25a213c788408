//! Main assembler logic

use std::fs;
use std::path::Path;

use rabbit_spec::Program;

use crate::encoder::encode;
use crate::error::Result;
use crate::parser::parse_line;

/// Assemble source code into a program
///
/// Assembly is all-or-nothing: the first error aborts the run and no
/// partial program is returned.
pub fn assemble(source: &str) -> Result<Program> {
    let mut code = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line_num = index + 1;

        let instr = match parse_line(line, line_num) {
            Ok(Some(instr)) => instr,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(line = line_num, error = %e, "assembly failed");
                return Err(e);
            }
        };

        let encoded = encode(&instr);
        tracing::debug!(
            line = line_num,
            address = code.len(),
            word = format_args!("{:#010x}", encoded.word),
            immediate = ?encoded.immediate,
            "{}",
            line.trim()
        );
        code.extend(encoded.words());
    }

    tracing::info!(words = code.len(), "assembled program");
    Ok(Program::new(code))
}

/// Assemble a source file
pub fn assemble_file(path: impl AsRef<Path>) -> Result<Program> {
    let source = fs::read_to_string(path)?;
    assemble(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssemblerError;

    #[test]
    fn test_assemble_simple() {
        let source = r#"
            ; Simple test
            add r1, r2, $5
            halt
        "#;

        let program = assemble(source).unwrap();
        assert_eq!(program.code, vec![0x2800_0021, 5, 0]);
    }

    #[test]
    fn test_assemble_reports_line_number() {
        let source = "halt\n\nadd r1, r2\n";
        let err = assemble(source).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_assemble_without_trailing_newline() {
        let with = assemble("out $72\nhalt\n").unwrap();
        let without = assemble("out $72\nhalt").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_assemble_missing_file() {
        let err = assemble_file("/nonexistent/rabbit/input.s").unwrap_err();
        assert!(matches!(err, AssemblerError::IoError(_)));
    }
}
