use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::common::constants::TEMP_FILE_EXT;
use crate::errors::{ErrorKind, JotError, JotResult};
use crate::store::StorageProvider;

/// The default filesystem storage backend.
///
/// Writes go through a temp-file-then-rename cycle: the contents are written
/// to a sibling `.tmp` file, flushed and synced, then renamed over the
/// target. On the same filesystem the rename is atomic, so a crash mid-write
/// leaves the target either fully updated or unchanged, never torn.
#[derive(Clone, Default)]
pub struct DiskStorage;

impl DiskStorage {
    pub fn new() -> Self {
        DiskStorage
    }

    fn atomic_write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension(TEMP_FILE_EXT);
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;

        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(contents)?;
            writer.flush()?;
        }

        // sync before rename so the rename never exposes a half-written file
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

impl StorageProvider for DiskStorage {
    fn read_file(&self, path: &Path) -> JotResult<Vec<u8>> {
        fs::read(path).map_err(|e| {
            log::error!("Failed to read file {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to read file {}", path.display()),
                ErrorKind::Read,
                e.into(),
            )
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> JotResult<()> {
        self.atomic_write(path, contents).map_err(|e| {
            log::error!("Failed to write file {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to write file {}", path.display()),
                ErrorKind::Write,
                e.into(),
            )
        })
    }

    fn delete_file(&self, path: &Path) -> JotResult<()> {
        fs::remove_file(path).map_err(|e| {
            log::error!("Failed to delete file {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to delete file {}", path.display()),
                ErrorKind::Io,
                e.into(),
            )
        })
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> JotResult<()> {
        fs::create_dir_all(path).map_err(|e| {
            log::error!("Failed to create directory {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to create directory {}", path.display()),
                ErrorKind::Io,
                e.into(),
            )
        })
    }

    fn remove_dir_recursive(&self, path: &Path) -> JotResult<()> {
        fs::remove_dir_all(path).map_err(|e| {
            log::error!("Failed to remove directory {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to remove directory {}", path.display()),
                ErrorKind::Io,
                e.into(),
            )
        })
    }

    fn list_dir(&self, path: &Path) -> JotResult<Vec<PathBuf>> {
        let entries = fs::read_dir(path).map_err(|e| {
            log::error!("Failed to list directory {}: {}", path.display(), e);
            JotError::new_with_cause(
                &format!("Failed to list directory {}", path.display()),
                ErrorKind::Io,
                e.into(),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                JotError::new_with_cause(
                    &format!("Failed to read a directory entry of {}", path.display()),
                    ErrorKind::Io,
                    e.into(),
                )
            })?;
            paths.push(entry.path());
        }
        Ok(paths)
    }
}
