use std::path::{Path, PathBuf};

use crate::common::constants::COLLECTION_FILE_EXT;
use crate::errors::{ErrorKind, JotError, JotResult};

/// Validates a database or collection name.
///
/// Names become path components, so they must be non-empty, must not
/// contain path separators and must not start with a dot.
pub fn validate_name(name: &str) -> JotResult<()> {
    if name.is_empty() {
        log::error!("Name cannot be empty");
        return Err(JotError::new(
            "Name cannot be empty",
            ErrorKind::InvalidOperation,
        ));
    }

    if name.contains('/') || name.contains('\\') {
        log::error!("Name '{}' cannot contain path separators", name);
        return Err(JotError::new(
            &format!("Name '{}' cannot contain path separators", name),
            ErrorKind::InvalidOperation,
        ));
    }

    if name.starts_with('.') {
        log::error!("Name '{}' cannot start with a dot", name);
        return Err(JotError::new(
            &format!("Name '{}' cannot start with a dot", name),
            ErrorKind::InvalidOperation,
        ));
    }

    Ok(())
}

/// Resolves the directory of a database under the root.
pub fn database_dir(root: &Path, database: &str) -> PathBuf {
    root.join(database)
}

/// Resolves the file path of a collection: `<root>/<database>/<name>.json`.
pub fn collection_file(root: &Path, database: &str, collection: &str) -> PathBuf {
    database_dir(root, database).join(format!("{}.{}", collection, COLLECTION_FILE_EXT))
}

/// Extracts the collection name from a `.json` file path, when it is one.
pub fn collection_stem(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(COLLECTION_FILE_EXT) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
