//! Domain primitives, ports and services for major selection.
//!
//! Purpose: keep the session user cache consistent with major selections
//! confirmed by the Stitch API, independent of how the API is reached or how
//! the cache is stored.
//!
//! Public surface:
//! - Error / ErrorCode — user-visible failure with a stable category.
//! - UserRecord — open JSON profile held by the session cache.
//! - Major / MajorCatalogue / SelectionConfirmation — catalogue data.
//! - UserCacheSync — cache-first user resolution and post-mutation merge.
//! - MajorSelectionFlow — state of the selection page.

pub mod error;
mod identifier;
mod major;
mod major_selection_flow;
pub mod ports;
mod user_cache_sync;
mod user_record;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{Identifier, IdentifierError, is_present};
pub use self::major::{Major, MajorCatalogue, SelectionConfirmation};
pub use self::major_selection_flow::{MajorOption, MajorSelectionFlow, Navigation};
pub use self::user_cache_sync::{CacheReconciliation, ResolvedUser, UserCacheSync, UserSource};
pub use self::user_record::{USER_ID_FIELDS, UserRecord};
