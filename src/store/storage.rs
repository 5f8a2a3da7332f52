use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::JotResult;
use crate::store::DiskStorage;

/// Low-level interface to the bytes behind a database tree.
///
/// # Purpose
/// Defines the contract every storage backend must follow. The collection
/// engine and the database managers only ever touch files through this
/// trait, so the whole-file read/rewrite strategy can later be replaced by
/// an incremental backend without changing their public contracts.
///
/// # Key Responsibilities
/// - **File access**: read, write and delete whole files
/// - **Directory management**: create, list and recursively remove
///   directories
/// - **Existence checks**: report whether a path is present
///
/// # Implementations
/// - [DiskStorage]: the default filesystem backend with
///   temp-file-then-rename writes
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; one [Storage] handle is shared by
/// every collection of an instance.
pub trait StorageProvider: Send + Sync {
    /// Reads the entire contents of a file.
    ///
    /// # Errors
    /// `Read` when the file is missing or unreadable.
    fn read_file(&self, path: &Path) -> JotResult<Vec<u8>>;

    /// Replaces the entire contents of a file, creating it when absent.
    ///
    /// # Errors
    /// `Write` when the contents cannot be persisted.
    fn write_file(&self, path: &Path, contents: &[u8]) -> JotResult<()>;

    /// Deletes a file.
    ///
    /// # Errors
    /// `Io` when the file cannot be removed.
    fn delete_file(&self, path: &Path) -> JotResult<()>;

    /// Checks whether a path exists (file or directory).
    fn path_exists(&self, path: &Path) -> bool;

    /// Checks whether a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Creates a directory and any missing parents.
    ///
    /// # Errors
    /// `Io` when the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> JotResult<()>;

    /// Removes a directory and everything below it.
    ///
    /// # Errors
    /// `Io` when removal fails.
    fn remove_dir_recursive(&self, path: &Path) -> JotResult<()>;

    /// Lists the direct entries of a directory, unsorted.
    ///
    /// # Errors
    /// `Io` when the directory cannot be read.
    fn list_dir(&self, path: &Path) -> JotResult<Vec<PathBuf>>;
}

/// Shared handle over a [StorageProvider].
///
/// Cloning is cheap; all clones delegate to the same provider. The default
/// handle wraps [DiskStorage].
#[derive(Clone)]
pub struct Storage {
    provider: Arc<dyn StorageProvider>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Wraps a custom provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Storage { provider }
    }

    /// The default filesystem-backed storage.
    pub fn disk() -> Self {
        Storage {
            provider: Arc::new(DiskStorage::new()),
        }
    }

    pub fn read_file(&self, path: &Path) -> JotResult<Vec<u8>> {
        self.provider.read_file(path)
    }

    pub fn write_file(&self, path: &Path, contents: &[u8]) -> JotResult<()> {
        self.provider.write_file(path, contents)
    }

    pub fn delete_file(&self, path: &Path) -> JotResult<()> {
        self.provider.delete_file(path)
    }

    pub fn path_exists(&self, path: &Path) -> bool {
        self.provider.path_exists(path)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.provider.is_dir(path)
    }

    pub fn create_dir_all(&self, path: &Path) -> JotResult<()> {
        self.provider.create_dir_all(path)
    }

    pub fn remove_dir_recursive(&self, path: &Path) -> JotResult<()> {
        self.provider.remove_dir_recursive(path)
    }

    pub fn list_dir(&self, path: &Path) -> JotResult<Vec<PathBuf>> {
        self.provider.list_dir(path)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::disk()
    }
}
