use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collection::{IdGenerator, UniqueIdGenerator};

/// Immutable configuration of a [JotDb](crate::jotdb::JotDb) instance.
///
/// A configuration is produced by the builder at open time and shared by
/// every handle of the instance; cloning is cheap. It carries the root path
/// of the database tree, the optional default database, the timestamp
/// policy, the create-if-missing bootstrap flags and the injected id
/// generation strategy.
///
/// # Examples
///
/// ```rust,ignore
/// let db = JotDb::builder()
///     .root("/data")
///     .database("app")
///     .include_timestamps(true)
///     .open()?;
///
/// assert_eq!(db.config().root(), Path::new("/data"));
/// ```
#[derive(Clone)]
pub struct JotDbConfig {
    inner: Arc<JotDbConfigInner>,
}

struct JotDbConfigInner {
    root: PathBuf,
    default_database: Option<String>,
    include_timestamps: bool,
    create_root_if_missing: bool,
    create_database_if_missing: bool,
    create_collection_if_missing: bool,
    id_generator: Arc<dyn IdGenerator>,
}

impl std::fmt::Debug for JotDbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JotDbConfig")
            .field("root", &self.inner.root)
            .field("default_database", &self.inner.default_database)
            .field("include_timestamps", &self.inner.include_timestamps)
            .field("create_root_if_missing", &self.inner.create_root_if_missing)
            .field(
                "create_database_if_missing",
                &self.inner.create_database_if_missing,
            )
            .field(
                "create_collection_if_missing",
                &self.inner.create_collection_if_missing,
            )
            .finish_non_exhaustive()
    }
}

impl JotDbConfig {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        root: PathBuf,
        default_database: Option<String>,
        include_timestamps: bool,
        create_root_if_missing: bool,
        create_database_if_missing: bool,
        create_collection_if_missing: bool,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        JotDbConfig {
            inner: Arc::new(JotDbConfigInner {
                root,
                default_database,
                include_timestamps,
                create_root_if_missing,
                create_database_if_missing,
                create_collection_if_missing,
                id_generator,
            }),
        }
    }

    /// The root path of the database tree.
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// The default database name, when one was selected.
    pub fn default_database(&self) -> Option<&str> {
        self.inner.default_database.as_deref()
    }

    /// Whether the engine maintains `createdAt`/`updatedAt` on documents.
    pub fn include_timestamps(&self) -> bool {
        self.inner.include_timestamps
    }

    /// Whether a missing root directory is created at open time.
    pub fn create_root_if_missing(&self) -> bool {
        self.inner.create_root_if_missing
    }

    /// Whether a missing database directory is created on access.
    pub fn create_database_if_missing(&self) -> bool {
        self.inner.create_database_if_missing
    }

    /// Whether a missing collection file is created on access.
    pub fn create_collection_if_missing(&self) -> bool {
        self.inner.create_collection_if_missing
    }

    /// The injected id generation strategy.
    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        self.inner.id_generator.clone()
    }
}

impl Default for JotDbConfig {
    fn default() -> Self {
        JotDbConfig::new(
            PathBuf::new(),
            None,
            true,
            true,
            true,
            true,
            Arc::new(UniqueIdGenerator::new()),
        )
    }
}
