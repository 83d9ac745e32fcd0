//! # logmsg-domain
//!
//! Domain model of the structured logging core:
//!
//! - **Levels** - `LogLevel`, `EventId`
//! - **Values** - `LogValue`, `ToLogValue`
//! - **Templates** - `MessageTemplate`, `TemplateCache`, `TemplateError`
//! - **Containers** - `LogValues`, the ordered key/value payload with cached
//!   formatted text
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No sink or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// Re-export shared types for convenience
pub use logmsg_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod event;
pub mod level;
pub mod template;
pub mod value;
pub mod values;

pub use event::EventId;
pub use level::{LevelParseError, LogLevel};
pub use template::{MessageTemplate, ORIGINAL_FORMAT_KEY, TemplateCache, TemplateError};
pub use value::{LogValue, NULL_TEXT, ToLogValue};
pub use values::{LogPair, LogValues, Pairs};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        let version = domain_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn domain_depends_on_shared() {
        let shared_version = shared_crate_version();
        assert!(!shared_version.is_empty());
    }
}
