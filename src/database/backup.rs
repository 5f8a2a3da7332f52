use std::path::{Path, PathBuf};

use crate::common::constants::BACKUP_DIR_PREFIX;
use crate::common::util::time::epoch_seconds;
use crate::errors::JotResult;
use crate::jotdb_config::JotDbConfig;
use crate::store::Storage;

/// Snapshot backups of an instance's database tree.
///
/// A backup copies every database directory and collection file under the
/// root into a timestamped directory (`backup-<epochSeconds>`) below the
/// chosen destination, byte for byte, through the same storage backend as
/// everything else. The destination should live outside the root; a
/// snapshot placed inside it is excluded from its own copy but would be
/// swept up by later backups.
pub struct Backup {
    config: JotDbConfig,
    storage: Storage,
}

impl Backup {
    pub(crate) fn new(config: JotDbConfig, storage: Storage) -> Self {
        Backup { config, storage }
    }

    /// Creates a snapshot under `dest` and returns its directory.
    ///
    /// # Errors
    ///
    /// `Io`/`Read`/`Write` when the tree cannot be traversed or copied.
    pub fn create_in(&self, dest: &Path) -> JotResult<PathBuf> {
        let snapshot = dest.join(format!("{}{}", BACKUP_DIR_PREFIX, epoch_seconds()));
        self.storage.create_dir_all(&snapshot)?;
        self.copy_tree(self.config.root(), &snapshot, &snapshot)?;
        log::info!(
            "Backed up {} to {}",
            self.config.root().display(),
            snapshot.display()
        );
        Ok(snapshot)
    }

    fn copy_tree(&self, from: &Path, to: &Path, skip: &Path) -> JotResult<()> {
        for entry in self.storage.list_dir(from)? {
            if entry == skip {
                continue;
            }
            let Some(name) = entry.file_name() else {
                continue;
            };
            let target = to.join(name);
            if self.storage.is_dir(&entry) {
                self.storage.create_dir_all(&target)?;
                self.copy_tree(&entry, &target, skip)?;
            } else {
                let contents = self.storage.read_file(&entry)?;
                self.storage.write_file(&target, &contents)?;
            }
        }
        Ok(())
    }
}
