//! Assembler errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Line {line}: unknown instruction `{mnemonic}`")]
    UnknownInstruction { line: usize, mnemonic: String },

    #[error("Line {line}, column {column}: invalid operand `{found}`, expected $N, rN, or @bif")]
    InvalidOperand {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("Line {line}, column {column}: unrecognized input `{text}`")]
    InvalidToken {
        line: usize,
        column: usize,
        text: String,
    },

    #[error("Line {line}: unknown bif `@{name}`")]
    UnknownBif { line: usize, name: String },

    #[error("Line {line}: `{mnemonic}` expects {expected} operand(s), found {found}")]
    UnexpectedEndOfLine {
        line: usize,
        mnemonic: String,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}, column {column}: expected `)`")]
    MissingCloseParen { line: usize, column: usize },

    #[error("Line {line}: `{mnemonic}` does not accept an immediate in operand {slot}")]
    ImmediateNotAllowed {
        line: usize,
        mnemonic: String,
        slot: char,
    },

    #[error("Line {line}: integer `{text}` does not fit in a word")]
    InvalidInteger { line: usize, text: String },

    #[error("Line {line}, column {column}: unexpected `{found}`")]
    UnexpectedToken {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AssemblerError {
    /// Source line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AssemblerError::UnknownInstruction { line, .. }
            | AssemblerError::InvalidOperand { line, .. }
            | AssemblerError::InvalidToken { line, .. }
            | AssemblerError::UnknownBif { line, .. }
            | AssemblerError::UnexpectedEndOfLine { line, .. }
            | AssemblerError::MissingCloseParen { line, .. }
            | AssemblerError::ImmediateNotAllowed { line, .. }
            | AssemblerError::InvalidInteger { line, .. }
            | AssemblerError::UnexpectedToken { line, .. } => Some(*line),
            AssemblerError::IoError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
