//! Database directory management.
//!
//! A database is a directory of collection files directly below the
//! instance root. [Databases] manages the set of those directories,
//! [Database] is the handle to one of them, and [Backup] snapshots the
//! whole tree.

mod backup;
#[allow(clippy::module_inception)]
mod database;
mod databases;

pub use backup::Backup;
pub use database::Database;
pub use databases::Databases;
