use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::{ErrorKind, JotError};

/// Specifies the direction for sorting documents.
///
/// # Purpose
/// Defines whether documents should be sorted in ascending (low to high) or
/// descending (high to low) order when a query chain calls `order_by()`.
///
/// # Variants
/// - `Ascending`: smallest to largest value (A to Z, 0 to 9, oldest to newest)
/// - `Descending`: largest to smallest value (Z to A, 9 to 0, newest to oldest)
///
/// # Usage
/// ```text
/// let view = collection.order_by("username", SortOrder::Ascending).get();
/// ```
///
/// Direction strings coming from configuration or user input parse through
/// [FromStr]; anything other than `asc`/`desc` (case-insensitive, with the
/// long forms `ascending`/`descending` accepted) is a validation error
/// rather than a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    Descending,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = JotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => {
                log::error!("Unknown sort direction '{}'", other);
                Err(JotError::new(
                    &format!("Unknown sort direction '{}', expected 'asc' or 'desc'", other),
                    ErrorKind::InvalidOperation,
                ))
            }
        }
    }
}
