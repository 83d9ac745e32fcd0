//! # logmsg-testkit
//!
//! Recording sinks and assertion helpers for tests.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod assertions;
pub mod errors;
pub mod in_memory;

pub use assertions::{CountingValue, assert_log_values};
pub use in_memory::{NoopLogger, ScopeContext, TestSink, WriteContext};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_ports::ports_crate_version;
    use logmsg_shared::shared_crate_version;

    #[test]
    fn testkit_crate_compiles() {
        let version = testkit_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn testkit_can_use_ports_and_shared() {
        let ports_version = ports_crate_version();
        let shared_version = shared_crate_version();

        assert!(!ports_version.is_empty());
        assert!(!shared_version.is_empty());
    }

    #[test]
    fn error_fixtures_are_available() {
        let codes = errors::template_error_codes();
        assert!(!codes.is_empty());
    }

    #[test]
    fn in_memory_sinks_are_available() {
        let _ = NoopLogger;
        assert_eq!(TestSink::new().active_scopes(), 0);
    }
}
