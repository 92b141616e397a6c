//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: `reqwest`-backed user directory and major catalogue speaking
//!   the Stitch REST envelope.
//! - **cache**: session cache slots, in memory or persisted as a JSON file.
//!
//! Adapters are thin translators between transport representations and
//! domain types. They contain no business logic.

pub mod cache;
pub mod http;
