use std::sync::Arc;

use crate::collection::Collection;
use crate::common::LockRegistry;
use crate::database::{Backup, Database, Databases};
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::jotdb_builder::JotDbBuilder;
use crate::jotdb_config::JotDbConfig;
use crate::store::Storage;

/// An embedded, file-backed JSON document store.
///
/// `JotDb` is the main entry point. An instance is rooted at a directory;
/// each database is a sub-directory and each collection a pretty-printed
/// JSON array file inside it. Handles are cheap to clone and share the
/// same configuration, storage backend and lock registry.
///
/// # Examples
///
/// ```rust,ignore
/// let db = JotDb::builder()
///     .root("/var/lib/myapp")
///     .database("app")
///     .open()?;
///
/// let mut users = db.collection("users")?;
/// users.insert(doc! { "username": "cyd" })?;
/// ```
#[derive(Clone)]
pub struct JotDb {
    inner: Arc<JotDbInner>,
}

struct JotDbInner {
    config: JotDbConfig,
    storage: Storage,
    lock_registry: LockRegistry,
}

impl JotDb {
    /// Returns a builder for configuring and opening an instance.
    pub fn builder() -> JotDbBuilder {
        JotDbBuilder::new()
    }

    pub(crate) fn new(config: JotDbConfig, storage: Storage) -> Self {
        JotDb {
            inner: Arc::new(JotDbInner {
                config,
                storage,
                lock_registry: LockRegistry::new(),
            }),
        }
    }

    /// The configuration this instance was opened with.
    pub fn config(&self) -> &JotDbConfig {
        &self.inner.config
    }

    /// Returns the database manager for this instance.
    pub fn databases(&self) -> Databases {
        Databases::new(
            self.inner.config.clone(),
            self.inner.storage.clone(),
            self.inner.lock_registry.clone(),
        )
    }

    /// Opens the named database, creating it when the configuration
    /// allows.
    ///
    /// # Errors
    ///
    /// * `DatabaseNotFound` - the database is absent and creation is
    ///   disabled
    pub fn database(&self, name: &str) -> JotResult<Database> {
        self.databases().database(name)
    }

    /// Opens a collection in the default database.
    ///
    /// # Errors
    ///
    /// * `ConfigurationMissing` - no default database was configured
    /// * `CollectionNotFound` - the collection is absent and creation is
    ///   disabled
    pub fn collection(&self, name: &str) -> JotResult<Collection> {
        let database_name = self.inner.config.default_database().ok_or_else(|| {
            log::error!("Cannot open collection '{}': no default database configured", name);
            JotError::new(
                "No default database configured; call database(...) on the builder \
                 or address a database explicitly",
                ErrorKind::ConfigurationMissing,
            )
        })?;
        self.database(database_name)?.collection(name)
    }

    /// Returns the backup facility for this instance.
    pub fn backup(&self) -> Backup {
        Backup::new(self.inner.config.clone(), self.inner.storage.clone())
    }
}
