//! Collections and documents.
//!
//! This module holds the core of the store: [Document], the
//! insertion-ordered field map every record is made of, and [Collection],
//! the engine that binds one JSON file, narrows a view through chained
//! query calls, and mutates the file by whole-file rewrite.
//!
//! # Documents
//!
//! A [Document] is a key-value map from [String] to
//! [Value](crate::common::Value). The [doc!](crate::doc) macro builds one
//! with JSON-like syntax:
//!
//! ```rust
//! use jotdb::doc;
//!
//! let user = doc! {
//!     username: "ada",
//!     age: 36,
//!     location: { state: "KY" }
//! };
//! ```
//!
//! # Query chains
//!
//! ```rust,ignore
//! let mut users = db.collection("users")?;
//! let view = users
//!     .filter(&Filter::new().eq("location.state", "KY"))
//!     .order_by("age", SortOrder::Descending)
//!     .limit(10)
//!     .get();
//! ```
//!
//! # Document ids
//!
//! Every document carries a unique string `id`. Inserts without one get a
//! process-unique id from the configured [IdGenerator]; the default is
//! [UniqueIdGenerator].

#[allow(clippy::module_inception)]
mod collection;
mod document;
mod unique_id;
mod view;

pub use collection::Collection;
pub use document::{normalize, Document};
pub use unique_id::{IdGenerator, UniqueIdGenerator};
pub use view::View;
