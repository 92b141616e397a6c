//! Driven port for the session-scoped user cache.
//!
//! The slot holds at most one [`UserRecord`]. Writes replace the whole slot;
//! merging is the caller's job.

use super::define_port_error;
use crate::domain::UserRecord;

define_port_error! {
    /// Errors surfaced by cache slot adapters.
    pub enum UserCacheError {
        /// The backing store could not be read or written.
        Storage { message: String } =>
            "user cache storage failed: {message}",
        /// The stored record could not be encoded or decoded.
        Serialization { message: String } =>
            "user cache serialisation failed: {message}",
    }
}

/// Single-entry store for the current session's user record.
#[cfg_attr(test, mockall::automock)]
pub trait UserCacheSlot: Send + Sync {
    /// Whether the slot currently holds a record.
    fn is_present(&self) -> Result<bool, UserCacheError>;

    /// Read the cached record, if any.
    fn read(&self) -> Result<Option<UserRecord>, UserCacheError>;

    /// Replace the slot contents with `record`.
    fn write(&self, record: &UserRecord) -> Result<(), UserCacheError>;
}
