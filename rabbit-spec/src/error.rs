//! # Error Types for the Rabbit program format

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RabbitError {
    #[error("Truncated word at byte offset {offset}: {len} trailing byte(s)")]
    TruncatedWord { offset: usize, len: usize },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
