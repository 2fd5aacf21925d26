//! Exists command.

use spat_fs::{directory_exists, directory_of_file_exists, file_exists, Filesystem};

use crate::cli::ExistsArgs;

/// Execute the exists command.
pub fn execute_exists<F>(args: &ExistsArgs, fs: &F) -> bool
where
    F: Filesystem + ?Sized,
{
    if args.parent {
        directory_of_file_exists(fs, &args.path)
    } else if args.dir {
        directory_exists(fs, &args.path)
    } else {
        file_exists(fs, &args.path)
    }
}
