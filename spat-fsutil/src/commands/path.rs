//! Path command: filename string operations.

use spat_fs::{
    base_name, base_name_without_extension, get_extension, parent_directory, set_extension,
    strip_extension,
};

use crate::cli::{CliError, PathArgs, PathOp};

use super::CommandResult;

/// Execute the path command. Never touches the filesystem.
pub fn execute_path(args: &PathArgs) -> CommandResult<String> {
    args.validate()?;

    let path = args.path.as_str();
    let result = match args.op {
        PathOp::Ext => get_extension(path),
        PathOp::Noext => strip_extension(path),
        PathOp::Base => base_name(path),
        PathOp::BaseNoext => base_name_without_extension(path),
        PathOp::Dir => parent_directory(path),
        PathOp::SetExt => {
            let ext = args.ext.as_deref().ok_or(CliError::MissingExtension)?;
            set_extension(path, ext)
        }
    };
    Ok(result)
}
