use std::path::{Path, PathBuf};

use crate::collection::Collection;
use crate::common::constants::EMPTY_COLLECTION;
use crate::common::LockRegistry;
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::jotdb_config::JotDbConfig;
use crate::store::{paths, Storage};

/// Handle to one database: a directory of collection files.
///
/// A handle is only constructed against an existing directory (the
/// [Databases](crate::database::Databases) manager creates it first when
/// creation on demand is enabled). Collection files are created as `[]`
/// before an engine is ever bound to them.
#[derive(Clone, Debug)]
pub struct Database {
    name: String,
    dir: PathBuf,
    config: JotDbConfig,
    storage: Storage,
    lock_registry: LockRegistry,
}

impl Database {
    pub(crate) fn open(
        name: &str,
        config: JotDbConfig,
        storage: Storage,
        lock_registry: LockRegistry,
    ) -> JotResult<Self> {
        let dir = paths::database_dir(config.root(), name);
        if !storage.is_dir(&dir) {
            log::error!("Database '{}' does not exist", name);
            return Err(JotError::new(
                &format!("Database '{}' does not exist", name),
                ErrorKind::DatabaseNotFound,
            ));
        }

        Ok(Database {
            name: name.to_string(),
            dir,
            config,
            storage,
            lock_registry,
        })
    }

    /// The database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The database directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Names of all collections in this database, sorted.
    pub fn collections(&self) -> JotResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.storage.list_dir(&self.dir)? {
            if let Some(stem) = paths::collection_stem(&entry) {
                names.push(stem);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Checks whether a collection file exists.
    pub fn collection_exists(&self, name: &str) -> JotResult<bool> {
        paths::validate_name(name)?;
        let path = self.collection_path(name);
        Ok(self.storage.path_exists(&path))
    }

    /// Creates a new, empty collection.
    ///
    /// # Errors
    ///
    /// `CollectionExists` when the collection is already present.
    pub fn create_collection(&self, name: &str) -> JotResult<()> {
        paths::validate_name(name)?;
        let path = self.collection_path(name);
        if self.storage.path_exists(&path) {
            log::error!("Collection '{}' already exists in database '{}'", name, self.name);
            return Err(JotError::new(
                &format!(
                    "Collection '{}' already exists in database '{}'",
                    name, self.name
                ),
                ErrorKind::CollectionExists,
            ));
        }

        self.storage.write_file(&path, EMPTY_COLLECTION.as_bytes())?;
        log::info!("Created collection '{}' in database '{}'", name, self.name);
        Ok(())
    }

    /// Deletes a collection and its file.
    ///
    /// # Errors
    ///
    /// `CollectionNotFound` when no such collection exists.
    pub fn delete_collection(&self, name: &str) -> JotResult<()> {
        paths::validate_name(name)?;
        let path = self.collection_path(name);
        if !self.storage.path_exists(&path) {
            log::error!("Collection '{}' does not exist in database '{}'", name, self.name);
            return Err(JotError::new(
                &format!(
                    "Collection '{}' does not exist in database '{}'",
                    name, self.name
                ),
                ErrorKind::CollectionNotFound,
            ));
        }

        self.storage.delete_file(&path)?;
        self.lock_registry.remove_lock(&path);
        log::info!("Deleted collection '{}' from database '{}'", name, self.name);
        Ok(())
    }

    /// Opens a collection engine, creating the file on demand when the
    /// instance was configured to.
    ///
    /// # Errors
    ///
    /// `CollectionNotFound` when the collection is absent and creation on
    /// demand is disabled.
    pub fn collection(&self, name: &str) -> JotResult<Collection> {
        paths::validate_name(name)?;
        let path = self.collection_path(name);
        if !self.storage.path_exists(&path) {
            if !self.config.create_collection_if_missing() {
                log::error!(
                    "Collection '{}' does not exist in database '{}'",
                    name,
                    self.name
                );
                return Err(JotError::new(
                    &format!(
                        "Collection '{}' does not exist in database '{}'",
                        name, self.name
                    ),
                    ErrorKind::CollectionNotFound,
                ));
            }
            self.storage.write_file(&path, EMPTY_COLLECTION.as_bytes())?;
            log::info!(
                "Created collection '{}' in database '{}' on demand",
                name,
                self.name
            );
        }

        let lock_handle = self.lock_registry.get_lock(&path);
        Collection::open(name, path, self.config.clone(), self.storage.clone(), lock_handle)
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        paths::collection_file(self.config.root(), &self.name, name)
    }
}
