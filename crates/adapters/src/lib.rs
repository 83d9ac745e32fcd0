//! # logmsg-adapters
//!
//! Sink implementations for the logger port: JSON and text line renderers,
//! a `tracing` bridge, and the thread-local scope stack they share.
//! This crate depends on `ports`, `config`, `domain`, and `shared`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Config-driven sink selection.
pub mod factory;
pub mod log_sink;
/// JSON line renderer.
pub mod logger;
mod render;
pub mod scope_stack;
pub mod text_logger;
pub mod tracing_logger;

pub use factory::logger_from_config;
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::{DEFAULT_MAX_SCOPE_DEPTH, JsonLogger};
pub use scope_stack::{ActiveScope, ScopeStack};
pub use text_logger::{TextLogger, short_level};
pub use tracing_logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_config::config_crate_version;
    use logmsg_ports::ports_crate_version;
    use logmsg_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;
        let mut in_dev_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                in_dev_deps = line == "[dev-dependencies]";
                continue;
            }
            if !(in_deps || in_dev_deps) {
                continue;
            }
            if line.starts_with("logmsg-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_app_or_testkit() {
        let deps = workspace_deps();
        let forbidden = ["logmsg-app", "logmsg-testkit"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn adapters_crate_compiles() {
        let version = adapters_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn adapters_can_use_ports_shared_config() {
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
        assert!(!config_crate_version().is_empty());
    }
}
