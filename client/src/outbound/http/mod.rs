//! Stitch REST API adapters.
//!
//! One [`StitchApi`] owns the HTTP client and the session cookie jar; the
//! port adapters share it through `Arc` so every call carries the same
//! credentials.

mod api_client;
mod dto;
mod major_catalog;
mod user_directory;

pub use api_client::{StitchApi, StitchApiBuildError, StitchApiOptions};
pub use major_catalog::HttpMajorCatalog;
pub use user_directory::HttpUserDirectory;
