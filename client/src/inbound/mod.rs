//! Inbound adapters that translate external requests into domain calls while
//! keeping framework details at the edge.
//!
//! The terminal front end lives under [`cli`].

pub mod cli;
