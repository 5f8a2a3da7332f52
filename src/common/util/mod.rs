//! Small free-function helpers used across the crate.

pub mod document_utils;
pub mod dot;
pub mod time;
pub mod type_utils;
