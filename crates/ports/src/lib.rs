//! # logmsg-ports
//!
//! Sink boundary traits for the logmsg structured logging core.
//!
//! This crate defines the interface between the logger façade and concrete
//! sinks. It depends only on `domain` and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;

pub use logger::*;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without depending on `logmsg-domain` directly.
pub use logmsg_domain::{EventId, LogLevel, LogPair, LogValue, LogValues};
