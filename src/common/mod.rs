//! Common types, constants and utilities shared across the crate.
//!
//! The most important citizens here are [Value], the tagged union every
//! document field holds, and [LockRegistry], the per-file lock table that
//! serializes mutations against one collection file.

pub mod constants;
mod lock;
mod sort_order;
pub mod util;
mod value;

pub use constants::*;
pub use lock::{LockHandle, LockRegistry};
pub use sort_order::SortOrder;
pub use util::time::{epoch_seconds, epoch_seconds_after_days};
pub use util::type_utils::{atomic, Atomic};
pub use value::Value;
