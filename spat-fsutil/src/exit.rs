//! Exit codes for spat-fsutil.

use crate::commands::CommandError;

/// Exit code constants.
pub mod codes {
    /// Successful execution.
    pub const SUCCESS: u8 = 0;
    /// Invalid arguments.
    pub const INVALID_ARGS: u8 = 1;
    /// IO error.
    pub const IO_ERROR: u8 = 2;
    /// The write gate refused an output.
    pub const GATE_REFUSED: u8 = 3;
    /// `exists` found nothing.
    pub const NOT_FOUND: u8 = 4;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> u8 {
    match error {
        CommandError::InvalidArgument(_) => codes::INVALID_ARGS,
        CommandError::Filesystem(_) => codes::IO_ERROR,
        CommandError::Json(_) => codes::IO_ERROR,
        CommandError::Gate(_) => codes::GATE_REFUSED,
        CommandError::NotFound(_) => codes::NOT_FOUND,
    }
}
