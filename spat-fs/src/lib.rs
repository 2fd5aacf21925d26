//! Filesystem utilities for spat.
//!
//! This crate provides:
//! - Filesystem trait with local, in-memory and `/vsi`-routing backends
//! - Filename string helpers (extension, base name, directory)
//! - Existence, writability and removal predicates
//! - The output write-safety gate with sidecar cleanup
//! - Whole-file text I/O as lines
//! - Collision-free temporary filenames

pub mod gate;
pub mod logger;
pub mod path;
pub mod probe;
pub mod sleeper;
pub mod tempname;
pub mod text;
pub mod vfs;

pub use gate::{
    can_write_batch, validate_distinct_names, GateConfig, GateError, GateReport, WriteGate,
    SIDECAR_EXTENSIONS,
};
pub use logger::{FacadeLogger, LogEntry, Logger, MockLogger, NullLogger, StderrLogger, Verbosity};
pub use path::{
    base_name, base_name_without_extension, get_extension, parent_directory, path_prefix,
    set_extension, strip_extension,
};
pub use probe::{can_write, directory_exists, directory_of_file_exists, file_exists, remove_file};
pub use sleeper::{MockSleeper, RealSleeper, Sleeper};
pub use tempname::{random_token, temp_file, TempNamer};
pub use text::{read_lines, read_text, write_lines, write_text};
pub use vfs::{
    is_virtual, EntryKind, Filesystem, FsError, MemoryFilesystem, RealFilesystem, VsiFilesystem,
    MEMORY_PREFIX, VIRTUAL_PREFIX,
};
