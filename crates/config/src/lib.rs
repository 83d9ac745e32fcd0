//! # logmsg-config
//!
//! Logging configuration schema, validation, and env overrides.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_FORMAT, ENV_INCLUDE_SCOPES, ENV_MIN_LEVEL, ENV_REDACT_SECRETS, EnvParseError, LoggingEnv,
    apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, load_logging_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LoggingConfig, OutputFormat,
    ValidatedLoggingConfig, parse_logging_config_json, parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_domain::domain_crate_version;
    use logmsg_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_domain_and_shared() {
        let domain_version = domain_crate_version();
        let shared_version = shared_crate_version();

        assert!(!domain_version.is_empty());
        assert!(!shared_version.is_empty());
    }
}
