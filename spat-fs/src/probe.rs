//! Filesystem predicates.
//!
//! Boolean queries over a [`Filesystem`]. Failures are reported as `false`,
//! never as errors.

use std::path::Path;

use crate::path::parent_directory;
use crate::vfs::{is_virtual, EntryKind, Filesystem};

/// True if anything (file or directory) exists at `path`.
pub fn file_exists<F: Filesystem + ?Sized>(fs: &F, path: &str) -> bool {
    fs.stat(Path::new(path)).is_some()
}

/// True only if `path` exists and is a directory.
pub fn directory_exists<F: Filesystem + ?Sized>(fs: &F, path: &str) -> bool {
    fs.stat(Path::new(path)) == Some(EntryKind::Directory)
}

/// Probe writability by creating `path` and deleting it again.
///
/// Not side-effect free: an existing file at `path` is truncated and then
/// removed. Only call this for paths that are expected not to exist.
pub fn can_write<F: Filesystem + ?Sized>(fs: &F, path: &str) -> bool {
    if fs.create(Path::new(path)).is_err() {
        return false;
    }
    remove_file(fs, path);
    true
}

/// True if the directory part of `path` is an existing directory.
pub fn directory_of_file_exists<F: Filesystem + ?Sized>(fs: &F, path: &str) -> bool {
    directory_exists(fs, &parent_directory(path))
}

/// Delete a file. Virtual paths are unlinked through the virtual layer first,
/// falling back to a plain delete.
pub fn remove_file<F: Filesystem + ?Sized>(fs: &F, path: &str) -> bool {
    let path_ref = Path::new(path);
    if is_virtual(path) && fs.unlink(path_ref).is_ok() {
        return true;
    }
    fs.remove(path_ref).is_ok()
}
