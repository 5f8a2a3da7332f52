use crate::common::LockRegistry;
use crate::database::Database;
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::jotdb_config::JotDbConfig;
use crate::store::{paths, Storage};

/// Manager of the set of databases under an instance's root.
///
/// Each database is a directory directly below the root; this handle
/// lists, creates and deletes those directories and opens [Database]
/// handles against them.
#[derive(Clone)]
pub struct Databases {
    config: JotDbConfig,
    storage: Storage,
    lock_registry: LockRegistry,
}

impl Databases {
    pub(crate) fn new(config: JotDbConfig, storage: Storage, lock_registry: LockRegistry) -> Self {
        Databases {
            config,
            storage,
            lock_registry,
        }
    }

    /// Names of all databases under the root, sorted.
    pub fn list(&self) -> JotResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in self.storage.list_dir(self.config.root())? {
            if !self.storage.is_dir(&entry) {
                continue;
            }
            if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Checks whether a database directory exists.
    pub fn exists(&self, name: &str) -> JotResult<bool> {
        paths::validate_name(name)?;
        let dir = paths::database_dir(self.config.root(), name);
        Ok(self.storage.is_dir(&dir))
    }

    /// Creates a new database.
    ///
    /// # Errors
    ///
    /// `DatabaseExists` when a database of that name is already present.
    pub fn create(&self, name: &str) -> JotResult<Database> {
        paths::validate_name(name)?;
        let dir = paths::database_dir(self.config.root(), name);
        if self.storage.is_dir(&dir) {
            log::error!("Database '{}' already exists", name);
            return Err(JotError::new(
                &format!("Database '{}' already exists", name),
                ErrorKind::DatabaseExists,
            ));
        }

        self.storage.create_dir_all(&dir)?;
        log::info!("Created database '{}'", name);
        Database::open(name, self.config.clone(), self.storage.clone(), self.lock_registry.clone())
    }

    /// Deletes a database and every collection in it.
    ///
    /// # Errors
    ///
    /// `DatabaseNotFound` when no such database exists.
    pub fn delete(&self, name: &str) -> JotResult<()> {
        paths::validate_name(name)?;
        let dir = paths::database_dir(self.config.root(), name);
        if !self.storage.is_dir(&dir) {
            log::error!("Database '{}' does not exist", name);
            return Err(JotError::new(
                &format!("Database '{}' does not exist", name),
                ErrorKind::DatabaseNotFound,
            ));
        }

        // drop the locks of every collection going away with the directory
        for entry in self.storage.list_dir(&dir)? {
            if paths::collection_stem(&entry).is_some() {
                self.lock_registry.remove_lock(&entry);
            }
        }

        self.storage.remove_dir_recursive(&dir)?;
        log::info!("Deleted database '{}'", name);
        Ok(())
    }

    /// Opens a handle to a database, creating the directory on demand when
    /// the instance was configured to.
    ///
    /// # Errors
    ///
    /// `DatabaseNotFound` when the database is absent and creation on
    /// demand is disabled.
    pub fn database(&self, name: &str) -> JotResult<Database> {
        paths::validate_name(name)?;
        let dir = paths::database_dir(self.config.root(), name);
        if !self.storage.is_dir(&dir) {
            if !self.config.create_database_if_missing() {
                log::error!("Database '{}' does not exist", name);
                return Err(JotError::new(
                    &format!("Database '{}' does not exist", name),
                    ErrorKind::DatabaseNotFound,
                ));
            }
            self.storage.create_dir_all(&dir)?;
            log::info!("Created database '{}' on demand", name);
        }
        Database::open(name, self.config.clone(), self.storage.clone(), self.lock_registry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::collection::UniqueIdGenerator;

    fn fixture(create_on_demand: bool) -> (TempDir, Databases) {
        let dir = TempDir::new().unwrap();
        let config = JotDbConfig::new(
            PathBuf::from(dir.path()),
            None,
            false,
            true,
            create_on_demand,
            true,
            Arc::new(UniqueIdGenerator::new()),
        );
        let databases = Databases::new(config, Storage::disk(), LockRegistry::new());
        (dir, databases)
    }

    #[test]
    fn list_is_sorted_and_ignores_files() {
        let (dir, databases) = fixture(true);
        databases.create("zeta").unwrap();
        databases.create("alpha").unwrap();
        std::fs::write(dir.path().join("stray.json"), "[]").unwrap();

        assert_eq!(databases.list().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn create_then_exists_round_trip() {
        let (_dir, databases) = fixture(true);
        assert!(!databases.exists("app").unwrap());
        databases.create("app").unwrap();
        assert!(databases.exists("app").unwrap());
    }

    #[test]
    fn duplicate_create_fails() {
        let (_dir, databases) = fixture(true);
        databases.create("app").unwrap();
        let err = databases.create("app").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DatabaseExists);
    }

    #[test]
    fn delete_missing_database_fails() {
        let (_dir, databases) = fixture(true);
        let err = databases.delete("ghost").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DatabaseNotFound);
    }

    #[test]
    fn delete_removes_the_directory() {
        let (_dir, databases) = fixture(true);
        let db = databases.create("app").unwrap();
        db.create_collection("users").unwrap();

        databases.delete("app").unwrap();
        assert!(!databases.exists("app").unwrap());
        assert_eq!(databases.list().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn database_creates_on_demand_when_configured() {
        let (_dir, databases) = fixture(true);
        let db = databases.database("fresh").unwrap();
        assert_eq!(db.name(), "fresh");
        assert!(databases.exists("fresh").unwrap());
    }

    #[test]
    fn database_fails_when_on_demand_creation_disabled() {
        let (_dir, databases) = fixture(false);
        let err = databases.database("fresh").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DatabaseNotFound);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let (_dir, databases) = fixture(true);
        assert!(databases.create("").is_err());
        assert!(databases.create("a/b").is_err());
        assert!(databases.exists(".hidden").is_err());
    }
}
