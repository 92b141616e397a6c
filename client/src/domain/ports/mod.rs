//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod major_catalog;
mod user_cache_slot;
mod user_directory;

#[cfg(test)]
pub use major_catalog::MockMajorCatalog;
pub use major_catalog::{FixtureMajorCatalog, MajorCatalog, MajorCatalogError};
#[cfg(test)]
pub use user_cache_slot::MockUserCacheSlot;
pub use user_cache_slot::{UserCacheError, UserCacheSlot};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
