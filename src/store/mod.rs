//! Storage backend abstraction.
//!
//! Everything above this module reads and writes bytes exclusively through
//! the [StorageProvider] trait, wrapped in the cloneable [Storage] handle.
//! [DiskStorage] is the default backend; it persists collection files with
//! an atomic temp-file-then-rename write so crashes never leave a torn
//! file. Path resolution and name validation for the
//! `<root>/<database>/<collection>.json` layout live in [paths].

mod disk;
pub mod paths;
mod storage;

pub use disk::DiskStorage;
pub use storage::{Storage, StorageProvider};
