//! # JotDb - Embedded JSON Document Store
//!
//! JotDb is a small, embedded, file-backed JSON document store. Each
//! database is a directory under a configured root and each collection is a
//! single pretty-printed JSON array file inside it. Collections are queried
//! through a chainable filter/order/limit API and mutated with
//! read-modify-write whole-file rewrites.
//!
//! ## Key Features
//!
//! - **Embedded**: No separate server process, just files on disk
//! - **Plain JSON**: Collection files stay inspectable and editable by hand
//! - **Chainable Queries**: `filter`/`order_by`/`limit`/`id` narrowing with
//!   terminal `get`/`all`/`count` reads
//! - **Atomic Rewrites**: Every mutation goes through a temp-file-and-rename
//!   write so a crash never leaves a half-written collection
//! - **Timestamps**: Optional `createdAt`/`updatedAt` maintenance
//! - **Clean API**: PIMPL pattern provides a stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jotdb::{doc, JotDb, SortOrder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = JotDb::builder()
//!     .root("/var/lib/myapp")
//!     .database("app")
//!     .open()?;
//!
//! let mut users = db.collection("users")?;
//! users.insert(doc! { "username": "cyd", "age": 31 })?;
//!
//! let adults = users
//!     .filter(&jotdb::Filter::new().gte("age", 18))
//!     .order_by("username", SortOrder::Ascending)
//!     .get();
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Collections, documents, views and id generation
//! - [`common`] - Shared types, constants and utilities
//! - [`database`] - Database management and backups
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query predicates and filter parsing
//! - [`jotdb`] - Core database interface
//! - [`jotdb_builder`] - Database builder for initialization
//! - [`jotdb_config`] - Database configuration
//! - [`store`] - Storage backend abstractions

pub mod collection;
pub mod common;
pub mod database;
pub mod errors;
pub mod filter;
pub mod jotdb;
pub mod jotdb_builder;
pub mod jotdb_config;
pub mod store;

pub use collection::{Collection, Document, IdGenerator, UniqueIdGenerator, View};
pub use common::{atomic, Atomic, SortOrder, Value};
pub use errors::{ErrorKind, JotError, JotResult};
pub use filter::{CompareOp, Filter};
pub use jotdb::JotDb;
pub use jotdb_builder::JotDbBuilder;
pub use jotdb_config::JotDbConfig;
