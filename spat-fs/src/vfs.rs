//! Virtual filesystem abstraction for spat.
//!
//! Every existence check, read, write and delete in this crate goes through the
//! [`Filesystem`] trait, so local paths and virtual (`/vsi...`) paths are handled
//! the same way and the checks can be tested without touching the disk.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Prefix marking a virtual-filesystem path (`/vsimem/`, `/vsizip/`, `/vsis3/`, ...).
pub const VIRTUAL_PREFIX: &str = "/vsi";

/// Prefix of the in-memory virtual filesystem.
pub const MEMORY_PREFIX: &str = "/vsimem/";

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("path error: {0}")]
    Path(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },
}

/// Kind of entry found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Returns true if `path` carries the virtual-filesystem prefix.
pub fn is_virtual(path: &str) -> bool {
    path.starts_with(VIRTUAL_PREFIX)
}

fn is_virtual_path(path: &Path) -> bool {
    path.to_str().map_or(false, is_virtual)
}

/// Trait for filesystem operations.
/// Abstracted so virtual paths and in-memory test doubles share one code path.
pub trait Filesystem: Send + Sync {
    /// Stat a path. `None` if nothing exists there.
    fn stat(&self, path: &Path) -> Option<EntryKind>;

    /// Open a path for writing (creating or truncating it) and close it again.
    fn create(&self, path: &Path) -> Result<(), FsError>;

    /// Write data directly to a path, replacing previous content.
    /// No temp-then-rename: a failed write may leave a partial file.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Read the whole file.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Size of the file in bytes, as reported by the backend.
    fn file_size(&self, path: &Path) -> Result<u64, FsError>;

    /// Plain local delete. Does not understand virtual paths.
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    /// Delete through the virtual-filesystem layer.
    fn unlink(&self, path: &Path) -> Result<(), FsError> {
        self.remove(path)
    }

    /// Create directory and parents if needed.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// Local-disk filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn stat(&self, path: &Path) -> Option<EntryKind> {
        let meta = fs::metadata(path).ok()?;
        if meta.is_dir() {
            Some(EntryKind::Directory)
        } else {
            Some(EntryKind::File)
        }
    }

    fn create(&self, path: &Path) -> Result<(), FsError> {
        // Handle is dropped (closed) immediately
        fs::File::create(path)?;
        Ok(())
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        fs::write(path, data)?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        Ok(fs::read(path)?)
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        Ok(fs::metadata(path)?.len())
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path)?;
        Ok(())
    }

    fn unlink(&self, path: &Path) -> Result<(), FsError> {
        if is_virtual_path(path) {
            return Err(FsError::Unsupported(format!(
                "no virtual filesystem backend for {}",
                path.display()
            )));
        }
        self.remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}

/// In-memory filesystem.
///
/// Backs `/vsimem/` in [`VsiFilesystem`] and doubles as the test filesystem.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
    locked: Arc<RwLock<HashSet<PathBuf>>>,
    reported_sizes: Arc<RwLock<HashMap<PathBuf, u64>>>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all files in the memory filesystem.
    pub fn files(&self) -> HashMap<PathBuf, Vec<u8>> {
        self.files.read().unwrap().clone()
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path.as_ref()).cloned()
    }

    /// Add a file directly, creating its parent directories.
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().unwrap().insert(path, data.into());
    }

    /// Add a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.write().unwrap();
        for dir in path.as_ref().ancestors() {
            if !dir.as_os_str().is_empty() {
                dirs.insert(dir.to_path_buf());
            }
        }
    }

    /// Make a path refuse writes and deletes with a permission error.
    pub fn lock(&self, path: impl Into<PathBuf>) {
        self.locked.write().unwrap().insert(path.into());
    }

    /// Override the size reported by `file_size`, simulating a short read.
    pub fn set_reported_size(&self, path: impl Into<PathBuf>, size: u64) {
        self.reported_sizes.write().unwrap().insert(path.into(), size);
    }

    fn is_dir(&self, path: &Path) -> bool {
        path == Path::new("/") || self.dirs.read().unwrap().contains(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            None => true,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => self.is_dir(parent),
        }
    }

    fn check_writable(&self, path: &Path) -> Result<(), FsError> {
        if self.locked.read().unwrap().contains(path) {
            return Err(permission_denied(path));
        }
        if self.is_dir(path) {
            return Err(FsError::Path(format!("is a directory: {}", path.display())));
        }
        if !self.parent_exists(path) {
            return Err(not_found(path));
        }
        Ok(())
    }
}

fn not_found(path: &Path) -> FsError {
    FsError::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("file not found: {}", path.display()),
    ))
}

fn permission_denied(path: &Path) -> FsError {
    FsError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    ))
}

impl Filesystem for MemoryFilesystem {
    fn stat(&self, path: &Path) -> Option<EntryKind> {
        if self.files.read().unwrap().contains_key(path) {
            Some(EntryKind::File)
        } else if self.is_dir(path) {
            Some(EntryKind::Directory)
        } else {
            None
        }
    }

    fn create(&self, path: &Path) -> Result<(), FsError> {
        self.write_file(path, &[])
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.check_writable(path)?;
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.get_file(path).ok_or_else(|| not_found(path))
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        if let Some(size) = self.reported_sizes.read().unwrap().get(path) {
            return Ok(*size);
        }
        self.files
            .read()
            .unwrap()
            .get(path)
            .map(|data| data.len() as u64)
            .ok_or_else(|| not_found(path))
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        if self.locked.read().unwrap().contains(path) {
            return Err(permission_denied(path));
        }
        match self.files.write().unwrap().remove(path) {
            Some(_) => Ok(()),
            None => Err(not_found(path)),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        self.add_dir(path);
        Ok(())
    }
}

/// Where a path is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Memory,
    OtherVirtual,
    Inner,
}

fn route(path: &Path) -> Route {
    match path.to_str() {
        Some(p) if p.starts_with(MEMORY_PREFIX) => Route::Memory,
        Some(p) if is_virtual(p) => Route::OtherVirtual,
        _ => Route::Inner,
    }
}

fn unsupported(path: &Path) -> FsError {
    FsError::Unsupported(format!(
        "no virtual filesystem backend for {}",
        path.display()
    ))
}

/// Filesystem that serves `/vsimem/` paths from memory and everything else
/// from an inner backend.
///
/// Other `/vsi*` schemes have no store here: they never exist and cannot be
/// written. `remove` is the plain delete and always goes to the inner backend;
/// only `unlink` reaches the memory store.
#[derive(Debug, Clone, Default)]
pub struct VsiFilesystem<L = RealFilesystem> {
    inner: L,
    memory: MemoryFilesystem,
}

impl<L: Filesystem> VsiFilesystem<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            memory: MemoryFilesystem::new(),
        }
    }

    /// Handle to the `/vsimem/` store.
    pub fn memory(&self) -> &MemoryFilesystem {
        &self.memory
    }

    /// The backend serving non-virtual paths.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    fn ensure_memory_parent(&self, path: &Path) -> Result<(), FsError> {
        // /vsimem/ has no real directories; writes create them implicitly
        if let Some(parent) = path.parent() {
            self.memory.create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<L: Filesystem> Filesystem for VsiFilesystem<L> {
    fn stat(&self, path: &Path) -> Option<EntryKind> {
        match route(path) {
            Route::Memory => self.memory.stat(path),
            Route::OtherVirtual => None,
            Route::Inner => self.inner.stat(path),
        }
    }

    fn create(&self, path: &Path) -> Result<(), FsError> {
        match route(path) {
            Route::Memory => {
                self.ensure_memory_parent(path)?;
                self.memory.create(path)
            }
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.create(path),
        }
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        match route(path) {
            Route::Memory => {
                self.ensure_memory_parent(path)?;
                self.memory.write_file(path, data)
            }
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.write_file(path, data),
        }
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        match route(path) {
            Route::Memory => self.memory.read_file(path),
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.read_file(path),
        }
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        match route(path) {
            Route::Memory => self.memory.file_size(path),
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.file_size(path),
        }
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        self.inner.remove(path)
    }

    fn unlink(&self, path: &Path) -> Result<(), FsError> {
        match route(path) {
            Route::Memory => self.memory.remove(path),
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.unlink(path),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        match route(path) {
            Route::Memory => self.memory.create_dir_all(path),
            Route::OtherVirtual => Err(unsupported(path)),
            Route::Inner => self.inner.create_dir_all(path),
        }
    }
}
