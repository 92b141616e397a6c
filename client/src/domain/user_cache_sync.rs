//! Session user cache synchronisation.
//!
//! Resolves the current user cache-first and, after the directory confirms a
//! major selection, reconciles the cache in two tiers: a full refresh merged
//! over the cached record, or a local patch of the cached record when the
//! refresh is unavailable.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{UserCacheError, UserCacheSlot, UserDirectory, UserDirectoryError};
use crate::domain::{Error, ErrorCode, Identifier, MajorCatalogue, SelectionConfirmation, UserRecord};

pub(crate) const NO_MAJOR_SELECTED: &str = "Please select a major.";
pub(crate) const NO_USER_IDENTIFIER: &str =
    "Unable to load your user information. Please log in again.";
pub(crate) const MUTATION_FAILED: &str = "Failed to select a major.";
pub(crate) const NO_CACHED_RECORD: &str =
    "No cached user record to update. Please reload your profile.";
const USER_FETCH_FAILED: &str = "Failed to load user information.";
const USER_PAYLOAD_INVALID: &str = "Unable to load user data.";

/// Where a resolved user record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSource {
    /// Served from the session cache without a network call.
    Cache,
    /// Fetched from the user directory; the cache was not written.
    Directory,
}

/// User record resolved for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    /// The resolved profile.
    pub record: UserRecord,
    /// Which tier produced it.
    pub source: UserSource,
}

/// Outcome of reconciling the cache after a confirmed major selection.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheReconciliation {
    /// The user was re-fetched and merged over the cached record.
    Refreshed(UserRecord),
    /// The refresh failed; the cached record was patched locally.
    PartiallyMerged(UserRecord),
    /// The server confirmed without a payload; the cache was left alone.
    Untouched,
}

impl CacheReconciliation {
    /// The record written to the cache, if any.
    pub const fn record(&self) -> Option<&UserRecord> {
        match self {
            Self::Refreshed(record) | Self::PartiallyMerged(record) => Some(record),
            Self::Untouched => None,
        }
    }
}

/// Cache-first user resolution and post-mutation cache reconciliation.
pub struct UserCacheSync<D, C> {
    directory: Arc<D>,
    cache: Arc<C>,
}

impl<D, C> Clone for UserCacheSync<D, C> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<D, C> UserCacheSync<D, C> {
    /// Create a new service over the given directory and cache slot.
    pub const fn new(directory: Arc<D>, cache: Arc<C>) -> Self {
        Self { directory, cache }
    }
}

impl<D, C> UserCacheSync<D, C>
where
    D: UserDirectory,
    C: UserCacheSlot,
{
    fn map_cache_error(error: UserCacheError) -> Error {
        Error::cache(format!("session cache unavailable: {error}"))
    }

    fn map_lookup_error(error: UserDirectoryError) -> Error {
        let message = match error {
            UserDirectoryError::Decode { .. }
            | UserDirectoryError::Rejected { .. } => USER_PAYLOAD_INVALID,
            UserDirectoryError::Transport { .. }
            | UserDirectoryError::Timeout { .. }
            | UserDirectoryError::Unsuccessful { .. } => USER_FETCH_FAILED,
        };
        Error::fetch(message).with_landing_redirect()
    }

    fn map_mutation_error(error: &UserDirectoryError) -> Error {
        error
            .server_message()
            .and_then(|message| Error::try_new(ErrorCode::MutationFailure, message).ok())
            .unwrap_or_else(|| Error::mutation(MUTATION_FAILED))
    }

    /// Resolve the current user, preferring the session cache.
    ///
    /// A cache hit never reaches the directory. A directory result is returned
    /// as-is and is not written to the cache. Directory failures are
    /// [`ErrorCode::FetchFailure`] errors flagged to redirect to the landing
    /// page.
    pub async fn resolve_current_user(&self) -> Result<ResolvedUser, Error> {
        if self.cache.is_present().map_err(Self::map_cache_error)? {
            if let Some(record) = self.cache.read().map_err(Self::map_cache_error)? {
                debug!("user record served from session cache");
                return Ok(ResolvedUser {
                    record,
                    source: UserSource::Cache,
                });
            }
        }

        let record = self.directory.current_user().await.map_err(|error| {
            warn!(%error, "current user lookup failed");
            Self::map_lookup_error(error)
        })?;
        debug!("user record fetched from directory");
        Ok(ResolvedUser {
            record,
            source: UserSource::Directory,
        })
    }

    /// Submit a major selection and reconcile the cache once it is confirmed.
    ///
    /// Validation happens before any network call: a missing `major_id` or a
    /// user without an identifier (see [`crate::domain::USER_ID_FIELDS`]) is
    /// an [`ErrorCode::ValidationFailure`]. A failed update leaves the cache
    /// untouched and carries the server's message when it sent one. A confirmed
    /// update with nothing cached is a [`ErrorCode::ValidationFailure`]; the
    /// directory is not re-read and the slot stays empty.
    pub async fn apply_major_selection(
        &self,
        user: Option<&UserRecord>,
        major_id: Option<&Identifier>,
        catalogue: &MajorCatalogue,
    ) -> Result<CacheReconciliation, Error> {
        let Some(major_id) = major_id else {
            return Err(Error::validation(NO_MAJOR_SELECTED));
        };
        let Some(user_id) = user.and_then(UserRecord::user_id) else {
            debug!(?user, "no identifier field present on user record");
            return Err(Error::validation(NO_USER_IDENTIFIER));
        };

        debug!(%user_id, %major_id, "submitting major selection");
        let confirmation = self
            .directory
            .update_major(&user_id, major_id)
            .await
            .map_err(|error| {
                warn!(%error, "major selection rejected");
                Self::map_mutation_error(&error)
            })?;

        let Some(confirmation) = confirmation else {
            info!("major selection confirmed without payload; cache left as is");
            return Ok(CacheReconciliation::Untouched);
        };
        self.reconcile_cache(major_id, confirmation, catalogue).await
    }

    async fn reconcile_cache(
        &self,
        major_id: &Identifier,
        confirmation: SelectionConfirmation,
        catalogue: &MajorCatalogue,
    ) -> Result<CacheReconciliation, Error> {
        let Some(cached) = self.cache.read().map_err(Self::map_cache_error)? else {
            warn!("major selection confirmed but no cached user record to reconcile");
            return Err(Error::validation(NO_CACHED_RECORD));
        };

        match self.directory.current_user().await {
            Ok(fresh) => {
                let merged = cached.merged_with(fresh);
                self.cache.write(&merged).map_err(Self::map_cache_error)?;
                info!("user cache refreshed after major selection");
                Ok(CacheReconciliation::Refreshed(merged))
            }
            Err(error) => {
                warn!(%error, "refresh after major selection failed; patching cached record");
                let patched =
                    cached.with_major_selection(confirmation, catalogue.name_of(major_id));
                self.cache.write(&patched).map_err(Self::map_cache_error)?;
                info!("user cache partially updated after major selection");
                Ok(CacheReconciliation::PartiallyMerged(patched))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_cache_sync_tests.rs"]
mod tests;
