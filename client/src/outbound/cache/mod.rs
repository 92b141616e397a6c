//! Session cache slot adapters.
//!
//! - [`InMemoryUserCacheSlot`] lives as long as the process, like a browser
//!   session store.
//! - [`JsonFileUserCacheSlot`] persists the record as JSON so a terminal
//!   session survives between invocations.
//! - [`SessionCacheSlot`] picks one of the two at startup.

mod json_file;
mod memory;

use std::path::Path;

pub use json_file::JsonFileUserCacheSlot;
pub use memory::InMemoryUserCacheSlot;

use crate::domain::UserRecord;
use crate::domain::ports::{UserCacheError, UserCacheSlot};

/// Cache slot chosen from configuration.
#[derive(Debug)]
pub enum SessionCacheSlot {
    /// Process-local slot.
    Memory(InMemoryUserCacheSlot),
    /// File-backed slot.
    File(JsonFileUserCacheSlot),
}

impl SessionCacheSlot {
    /// Open a file-backed slot when `path` is given, else an empty in-memory
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`UserCacheError::Storage`] when the file slot cannot be opened.
    pub fn from_path(path: Option<&Path>) -> Result<Self, UserCacheError> {
        match path {
            Some(path) => JsonFileUserCacheSlot::open(path).map(Self::File),
            None => Ok(Self::Memory(InMemoryUserCacheSlot::new())),
        }
    }
}

impl UserCacheSlot for SessionCacheSlot {
    fn is_present(&self) -> Result<bool, UserCacheError> {
        match self {
            Self::Memory(slot) => slot.is_present(),
            Self::File(slot) => slot.is_present(),
        }
    }

    fn read(&self) -> Result<Option<UserRecord>, UserCacheError> {
        match self {
            Self::Memory(slot) => slot.read(),
            Self::File(slot) => slot.read(),
        }
    }

    fn write(&self, record: &UserRecord) -> Result<(), UserCacheError> {
        match self {
            Self::Memory(slot) => slot.write(record),
            Self::File(slot) => slot.write(record),
        }
    }
}
