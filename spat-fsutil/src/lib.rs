//! spat-fsutil command-line tool.
//!
//! Exposes the `spat_fs` helpers as subcommands so pipeline scripts can check
//! planned outputs, reserve temporary names and handle small text files.

pub mod cli;
pub mod commands;
pub mod exit;

pub use cli::{
    parse_from, CheckArgs, Cli, CliError, Command, ExistsArgs, OutputFormat, PathArgs, PathOp,
    ReadArgs, TempArgs, WriteArgs, DEFAULT_TEMP_DIR,
};
pub use commands::{
    execute_check, execute_exists, execute_path, execute_read, execute_temp, execute_write,
    render_report, CommandError, CommandResult,
};
