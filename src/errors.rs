use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::{atomic, Atomic};

/// Error kinds for jotdb operations.
///
/// Each kind names one category of failure so callers can match on the
/// category without parsing messages.
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::errors::{JotError, ErrorKind, JotResult};
///
/// fn example() -> JotResult<()> {
///     Err(JotError::new("users collection not found", ErrorKind::CollectionNotFound))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Configuration and bootstrap
    /// No configuration is bound for the requested operation, e.g. a
    /// collection access without a default database selected
    ConfigurationMissing,
    /// The configured root path does not exist and creation was not allowed
    RootNotFound,

    // Query errors
    /// A dynamic filter predicate is malformed (tuple arity, unknown operator)
    FilterFormat,

    // Identity errors
    /// A document id collides with an existing one on insert
    DuplicateId,
    /// A supplied document id is not a non-empty string
    InvalidId,

    // Storage errors
    /// The underlying storage write failed
    Write,
    /// The underlying storage read failed
    Read,
    /// A collection file does not parse as a JSON array of objects
    CorruptCollection,
    /// Generic IO failure outside the read/write paths
    Io,

    // Mutation guards
    /// delete() targeted the entire collection; use empty() instead
    DeleteAllGuard,

    // Catalog errors
    /// Collection does not exist
    CollectionNotFound,
    /// Collection already exists
    CollectionExists,
    /// Database directory does not exist
    DatabaseNotFound,
    /// Database directory already exists
    DatabaseExists,

    /// The operation is not valid in the current context
    InvalidOperation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConfigurationMissing => write!(f, "Configuration missing"),
            ErrorKind::RootNotFound => write!(f, "Root path not found"),
            ErrorKind::FilterFormat => write!(f, "Filter format error"),
            ErrorKind::DuplicateId => write!(f, "Duplicate document id"),
            ErrorKind::InvalidId => write!(f, "Invalid document id"),
            ErrorKind::Write => write!(f, "Write error"),
            ErrorKind::Read => write!(f, "Read error"),
            ErrorKind::CorruptCollection => write!(f, "Corrupt collection"),
            ErrorKind::Io => write!(f, "IO error"),
            ErrorKind::DeleteAllGuard => write!(f, "Delete-all guard"),
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::CollectionExists => write!(f, "Collection already exists"),
            ErrorKind::DatabaseNotFound => write!(f, "Database not found"),
            ErrorKind::DatabaseExists => write!(f, "Database already exists"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
        }
    }
}

/// Custom jotdb error type.
///
/// `JotError` carries the error message, its kind, and an optional cause.
/// A backtrace is captured at construction for debugging; the `Debug`
/// rendering includes it (or the cause chain when one exists).
///
/// # Examples
///
/// ```rust,ignore
/// use jotdb::errors::{JotError, ErrorKind};
///
/// // Create a simple error
/// let err = JotError::new("collection file is damaged", ErrorKind::CorruptCollection);
///
/// // Create an error with a cause
/// let cause = JotError::new("disk quota exceeded", ErrorKind::Io);
/// let err = JotError::new_with_cause("collection rewrite failed", ErrorKind::Write, cause);
/// ```
#[derive(Clone)]
pub struct JotError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<JotError>>,
    backtrace: Atomic<Backtrace>,
}

impl JotError {
    /// Creates a new `JotError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `JotError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        JotError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `JotError` with a cause error, preserving the chain
    /// for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: JotError) -> Self {
        JotError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&JotError> {
        self.cause.as_deref()
    }
}

impl Display for JotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for JotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for JotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for jotdb operations.
///
/// `JotResult<T>` is shorthand for `Result<T, JotError>`. All fallible
/// jotdb operations return this type.
pub type JotResult<T> = Result<T, JotError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for JotError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::Read,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Write,
            _ => ErrorKind::Io,
        };
        JotError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<String> for JotError {
    fn from(msg: String) -> Self {
        JotError::new(&msg, ErrorKind::InvalidOperation)
    }
}

impl From<&str> for JotError {
    fn from(msg: &str) -> Self {
        JotError::new(msg, ErrorKind::InvalidOperation)
    }
}
