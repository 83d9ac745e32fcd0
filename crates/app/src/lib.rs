//! # logmsg-app
//!
//! Logger façade, typed message definitions, and scope builders.
//! This crate depends on `ports`, `domain`, and `shared`.
//!
//! ```
//! use logmsg_app::{Logger, define2};
//! use logmsg_domain::{LogLevel, TemplateError};
//! use logmsg_testkit::TestSink;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), TemplateError> {
//! let sink = Arc::new(TestSink::new());
//! let logger = Logger::new("Routing", sink.clone());
//! let action_matched = define2::<&str, &str>(
//!     LogLevel::Information,
//!     1,
//!     "Request matched controller '{controller}' and action '{action}'.",
//! )?;
//!
//! action_matched.log(&logger, ("home", "index"), None);
//! assert_eq!(
//!     sink.writes()[0].message,
//!     "Request matched controller 'home' and action 'index'."
//! );
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod args;
pub mod logger;
pub mod message;
pub mod scope;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use args::LogArgs;
pub use logger::Logger;
pub use message::{LogMessage, define0, define1, define2, define3, define4, define5, define6};
pub use scope::{
    ScopeMessage, define_scope0, define_scope1, define_scope2, define_scope3, define_scope4,
    define_scope5, define_scope6,
};

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_domain::domain_crate_version;
    use logmsg_ports::ports_crate_version;
    use logmsg_shared::shared_crate_version;

    #[test]
    fn app_crate_compiles() {
        let version = app_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn app_can_use_ports_domain_shared() {
        let ports_version = ports_crate_version();
        let domain_version = domain_crate_version();
        let shared_version = shared_crate_version();

        assert!(!ports_version.is_empty());
        assert!(!domain_version.is_empty());
        assert!(!shared_version.is_empty());
    }
}
