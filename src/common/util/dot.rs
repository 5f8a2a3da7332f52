use crate::collection::Document;
use crate::common::constants::FIELD_SEPARATOR;
use crate::common::Value;

/// Returns true when the field reference contains a separator and therefore
/// addresses a nested field.
pub fn is_dot_path(path: &str) -> bool {
    path.contains(FIELD_SEPARATOR)
}

/// Resolves a dot-separated field path against a document.
///
/// Splits the path on `.` and walks nested documents segment by segment.
/// Resolution stops with [None] as soon as a segment is absent or an
/// intermediate value is not a nested document. Array-index segments and
/// wildcards are not supported.
///
/// A field whose name literally contains a dot is not reachable through this
/// resolver; the path is always interpreted as nesting.
pub fn resolve<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut current = document;
    let mut segments = path.split(FIELD_SEPARATOR).peekable();

    while let Some(segment) = segments.next() {
        let value = current.get_opt(segment)?;
        if segments.peek().is_none() {
            return Some(value);
        }
        current = value.as_document()?;
    }
    None
}
