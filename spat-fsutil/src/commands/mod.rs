//! Command orchestration for CLI subcommands.
//!
//! Provides execute functions for:
//! - `check` - Run the write gate over planned outputs
//! - `temp` - Generate a temporary filename
//! - `path` - Filename string operations
//! - `read` / `write` - Text files as lines
//! - `exists` - Existence predicates

pub mod check;
pub mod exists;
pub mod path;
pub mod temp;
pub mod text;

pub use check::{execute_check, render_report};
pub use exists::execute_exists;
pub use path::execute_path;
pub use temp::execute_temp;
pub use text::{execute_read, execute_write};

use crate::cli::CliError;
use spat_fs::{FsError, GateError};
use thiserror::Error;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("filesystem error: {0}")]
    Filesystem(#[from] FsError),

    #[error("{}: {}", .0.path(), .0)]
    Gate(#[from] GateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;
