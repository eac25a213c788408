//! Runtime error types
//!
//! These are host-level errors. Faults raised by the program itself are not
//! errors: they move the machine to [`MachineState::Failed`].

use rabbit_spec::RabbitError;
use thiserror::Error;

use crate::state::MachineState;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Program error: {0}")]
    SpecError(#[from] RabbitError),

    #[error("Machine is not running (state: {state:?})")]
    NotRunning { state: MachineState },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
