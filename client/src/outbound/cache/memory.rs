//! Process-local cache slot.

use std::sync::Mutex;

use crate::domain::UserRecord;
use crate::domain::ports::{UserCacheError, UserCacheSlot};

/// Cache slot held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryUserCacheSlot {
    record: Mutex<Option<UserRecord>>,
}

impl InMemoryUserCacheSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot already holding `record`.
    pub fn with_record(record: UserRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<UserRecord>>, UserCacheError> {
        self.record
            .lock()
            .map_err(|_| UserCacheError::storage("in-memory cache lock poisoned"))
    }
}

impl UserCacheSlot for InMemoryUserCacheSlot {
    fn is_present(&self) -> Result<bool, UserCacheError> {
        Ok(self.lock()?.is_some())
    }

    fn read(&self) -> Result<Option<UserRecord>, UserCacheError> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, record: &UserRecord) -> Result<(), UserCacheError> {
        *self.lock()? = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(id: i64) -> UserRecord {
        serde_json::from_value(json!({"id": id})).expect("object")
    }

    #[rstest]
    fn starts_empty() {
        let slot = InMemoryUserCacheSlot::new();
        assert!(!slot.is_present().expect("readable"));
        assert_eq!(slot.read().expect("readable"), None);
    }

    #[rstest]
    fn writes_replace_the_whole_record() {
        let slot = InMemoryUserCacheSlot::with_record(
            serde_json::from_value(json!({"id": 1, "nickname": "Ada"})).expect("object"),
        );

        slot.write(&record(2)).expect("writable");

        assert!(slot.is_present().expect("readable"));
        assert_eq!(slot.read().expect("readable"), Some(record(2)));
    }
}
