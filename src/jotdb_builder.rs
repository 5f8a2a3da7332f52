use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collection::{IdGenerator, UniqueIdGenerator};
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::jotdb::JotDb;
use crate::jotdb_config::JotDbConfig;
use crate::store::{paths, Storage};

/// Builder for creating and configuring a [JotDb] instance.
///
/// `JotDbBuilder` provides a fluent API for configuring an instance before
/// opening it. All setters are infallible; validation and bootstrap happen
/// in [JotDbBuilder::open].
///
/// # Examples
///
/// ```rust,ignore
/// let db = JotDb::builder()
///     .root("/var/lib/myapp")
///     .database("app")
///     .include_timestamps(true)
///     .open()?;
/// ```
pub struct JotDbBuilder {
    root: Option<PathBuf>,
    default_database: Option<String>,
    include_timestamps: bool,
    create_root_if_missing: bool,
    create_database_if_missing: bool,
    create_collection_if_missing: bool,
    id_generator: Option<Arc<dyn IdGenerator>>,
    storage: Option<Storage>,
}

impl JotDbBuilder {
    /// Creates a builder with the defaults: timestamps on, every
    /// create-if-missing flag on, the default id generator and disk
    /// storage.
    pub fn new() -> Self {
        JotDbBuilder {
            root: None,
            default_database: None,
            include_timestamps: true,
            create_root_if_missing: true,
            create_database_if_missing: true,
            create_collection_if_missing: true,
            id_generator: None,
            storage: None,
        }
    }

    /// Sets the root path of the database tree. Required.
    pub fn root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Selects the default database; [JotDb::collection] goes through it.
    pub fn database(mut self, name: &str) -> Self {
        self.default_database = Some(name.to_string());
        self
    }

    /// Enables or disables `createdAt`/`updatedAt` maintenance.
    pub fn include_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    /// Whether a missing root directory is created at open time.
    pub fn create_root_if_missing(mut self, create: bool) -> Self {
        self.create_root_if_missing = create;
        self
    }

    /// Whether a missing database directory is created on access.
    pub fn create_database_if_missing(mut self, create: bool) -> Self {
        self.create_database_if_missing = create;
        self
    }

    /// Whether a missing collection file is created on access.
    pub fn create_collection_if_missing(mut self, create: bool) -> Self {
        self.create_collection_if_missing = create;
        self
    }

    /// Injects the id generation strategy used for inserts without an id.
    pub fn id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Injects a custom storage backend.
    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Validates the configuration, bootstraps the tree and opens the
    /// instance.
    ///
    /// # Errors
    ///
    /// * `ConfigurationMissing` - no root path was given
    /// * `RootNotFound` - the root is absent and creation is disabled
    /// * `DatabaseNotFound` - the default database is absent and creation
    ///   is disabled
    pub fn open(self) -> JotResult<JotDb> {
        let root = self.root.ok_or_else(|| {
            log::error!("Cannot open: no root path configured");
            JotError::new(
                "No root path configured; call root(...) before open()",
                ErrorKind::ConfigurationMissing,
            )
        })?;

        if let Some(name) = &self.default_database {
            paths::validate_name(name)?;
        }

        let storage = self.storage.unwrap_or_default();
        if !storage.is_dir(&root) {
            if !self.create_root_if_missing {
                log::error!("Root path {} does not exist", root.display());
                return Err(JotError::new(
                    &format!("Root path {} does not exist", root.display()),
                    ErrorKind::RootNotFound,
                ));
            }
            storage.create_dir_all(&root)?;
            log::info!("Created root directory {}", root.display());
        }

        let config = JotDbConfig::new(
            root,
            self.default_database,
            self.include_timestamps,
            self.create_root_if_missing,
            self.create_database_if_missing,
            self.create_collection_if_missing,
            self.id_generator
                .unwrap_or_else(|| Arc::new(UniqueIdGenerator::new())),
        );

        let db = JotDb::new(config, storage);

        // a configured default database must exist once open() returns
        if let Some(name) = db.config().default_database() {
            let databases = db.databases();
            if !databases.exists(name)? {
                if !db.config().create_database_if_missing() {
                    log::error!("Default database '{}' does not exist", name);
                    return Err(JotError::new(
                        &format!("Default database '{}' does not exist", name),
                        ErrorKind::DatabaseNotFound,
                    ));
                }
                databases.create(name)?;
            }
        }

        log::info!("Opened jotdb instance at {}", db.config().root().display());
        Ok(db)
    }
}

impl Default for JotDbBuilder {
    fn default() -> Self {
        Self::new()
    }
}
