//! Query filters over document fields.
//!
//! A [Filter] is an ordered conjunction of predicates. Each predicate is
//! either a strict equality ([Predicate::Equals]) or an operator comparison
//! ([Predicate::Compare]); field references may be plain names or dot-paths
//! into nested documents.
//!
//! ```rust
//! use jotdb::filter::Filter;
//! use jotdb::doc;
//!
//! let adults_in_ky = Filter::new()
//!     .eq("location.state", "KY")
//!     .gte("age", 18);
//!
//! assert!(adults_in_ky.matches(&doc! { age: 21, location: { state: "KY" } }));
//! assert!(!adults_in_ky.matches(&doc! { age: 21, location: { state: "TX" } }));
//! ```

#[allow(clippy::module_inception)]
mod filter;

pub use filter::{CompareOp, Filter, Predicate};
