//! # logmsg-shared
//!
//! Shared result types, error handling, and redaction helpers for the logmsg
//! workspace.
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Error envelopes serialize for structured output

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod redaction;
pub mod result;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use redaction::{REDACTED, is_secret_key, redact_if_secret};
pub use result::Result;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
