//! Cache slot persisted as a JSON file.
//!
//! File access goes through a `cap_std` directory handle opened once on the
//! parent directory; the slot never touches paths outside it. Writes land in
//! a sibling temporary file that is renamed over the slot, so readers see
//! either the previous record or the new one.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::UserRecord;
use crate::domain::ports::{UserCacheError, UserCacheSlot};

/// Cache slot stored in one JSON file.
#[derive(Debug)]
pub struct JsonFileUserCacheSlot {
    directory: Dir,
    file_name: PathBuf,
}

impl JsonFileUserCacheSlot {
    /// Open a slot backed by `path`.
    ///
    /// The parent directory must exist; the file itself is created on the
    /// first write.
    ///
    /// # Errors
    ///
    /// Returns [`UserCacheError::Storage`] when `path` has no file name or the
    /// parent directory cannot be opened.
    pub fn open(path: &Path) -> Result<Self, UserCacheError> {
        let file_name = path.file_name().ok_or_else(|| {
            UserCacheError::storage(format!("cache path {} has no file name", path.display()))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
            UserCacheError::storage(format!(
                "failed to open cache directory {}: {error}",
                parent.display()
            ))
        })?;
        Ok(Self {
            directory,
            file_name: PathBuf::from(file_name),
        })
    }

    fn staging_name(&self) -> PathBuf {
        let mut name = self.file_name.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn storage_error(&self, action: &str, error: &io::Error) -> UserCacheError {
        UserCacheError::storage(format!(
            "failed to {action} {}: {error}",
            self.file_name.display()
        ))
    }
}

impl UserCacheSlot for JsonFileUserCacheSlot {
    fn is_present(&self) -> Result<bool, UserCacheError> {
        Ok(self.directory.exists(&self.file_name))
    }

    fn read(&self) -> Result<Option<UserRecord>, UserCacheError> {
        let raw = match self.directory.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.storage_error("read", &error)),
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(error) => {
                warn!(
                    file = %self.file_name.display(),
                    %error,
                    "ignoring undecodable user cache"
                );
                Ok(None)
            }
        }
    }

    fn write(&self, record: &UserRecord) -> Result<(), UserCacheError> {
        let encoded = serde_json::to_vec_pretty(record)
            .map_err(|error| UserCacheError::serialization(error.to_string()))?;
        let staging = self.staging_name();
        self.directory
            .write(&staging, encoded)
            .map_err(|error| self.storage_error("write", &error))?;
        self.directory
            .rename(&staging, &self.directory, &self.file_name)
            .map_err(|error| self.storage_error("replace", &error))?;
        debug!(file = %self.file_name.display(), "user cache written");
        Ok(())
    }
}
