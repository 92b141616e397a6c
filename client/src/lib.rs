//! Stitch major selection client.
//!
//! The crate follows a hexagonal layout: `domain` owns the user cache
//! synchronisation rules and the selection flow, `outbound` talks to the
//! Stitch REST API and the session cache, and `inbound` renders the flow for
//! the `stitch-majors` command line.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

pub use settings::ClientSettings;
