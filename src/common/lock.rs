use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A handle to the read-write lock guarding one collection file.
#[derive(Debug)]
pub struct LockHandle {
    lock: Arc<RwLock<()>>,
}

impl LockHandle {
    /// Creates a standalone lock handle.
    pub fn new() -> Self {
        LockHandle {
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Acquires a read lock
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read()
    }

    /// Acquires a write lock
    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write()
    }
}

impl Default for LockHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of per-file read-write locks.
///
/// Every mutation against a collection holds the write side of its file's
/// lock for the whole read-modify-write cycle, so two in-process mutators of
/// the same file cannot interleave and the loser-clobbers-winner race of a
/// bare rewrite cannot happen. Keying is by resolved file path; handles to
/// the same path share one lock even when obtained through different
/// database handles.
///
/// Locking is in-process only; coordinating writers across processes is out
/// of scope.
///
/// # Examples
///
/// ```
/// use jotdb::common::LockRegistry;
/// use std::path::Path;
///
/// let registry = LockRegistry::new();
/// let handle = registry.get_lock(Path::new("/data/app/users.json"));
/// {
///     let _read_guard = handle.read();
/// } // Read lock is held while _read_guard is in scope
/// {
///     let _write_guard = handle.write();
/// } // Write lock is held while _write_guard is in scope
/// ```
#[derive(Clone, Debug)]
pub struct LockRegistry {
    locks: Arc<RwLock<HashMap<PathBuf, Arc<RwLock<()>>>>>,
}

impl LockRegistry {
    /// Creates a new empty lock registry.
    pub fn new() -> Self {
        LockRegistry {
            locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets the lock handle for the given file path, creating the lock on
    /// first use.
    ///
    /// Multiple read locks can be held simultaneously for the same path.
    /// Only one write lock can be held at a time, and no read locks can be
    /// held while it is.
    ///
    /// # Arguments
    ///
    /// * `path` - The resolved collection file path
    ///
    /// # Returns
    ///
    /// A handle that can be used to acquire read or write locks.
    pub fn get_lock(&self, path: &Path) -> LockHandle {
        let lock = {
            let mut locks = self.locks.write();
            locks
                .entry(path.to_path_buf())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .clone()
        };
        LockHandle { lock }
    }

    /// Removes a lock from the registry, e.g. after its collection file is
    /// deleted.
    ///
    /// # Returns
    ///
    /// `true` if the lock was removed, `false` if it didn't exist.
    pub fn remove_lock(&self, path: &Path) -> bool {
        let mut locks = self.locks.write();
        locks.remove(path).is_some()
    }

    /// Returns the number of locks currently registered.
    pub fn lock_count(&self) -> usize {
        let locks = self.locks.read();
        locks.len()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
