//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - testable (parsing works from a plain key/value map)

use crate::schema::{LoggingConfig, OutputFormat, ValidatedLoggingConfig};
use logmsg_domain::LogLevel;
use logmsg_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: minimum level written.
pub const ENV_MIN_LEVEL: &str = "LOGMSG_MIN_LEVEL";
/// Env var: output format (`json` or `text`).
pub const ENV_FORMAT: &str = "LOGMSG_FORMAT";
/// Env var: attach active scopes to written lines.
pub const ENV_INCLUDE_SCOPES: &str = "LOGMSG_INCLUDE_SCOPES";
/// Env var: redact values under secret-looking keys.
pub const ENV_REDACT_SECRETS: &str = "LOGMSG_REDACT_SECRETS";

const ENV_VARS: [&str; 4] = [
    ENV_MIN_LEVEL,
    ENV_FORMAT,
    ENV_INCLUDE_SCOPES,
    ENV_REDACT_SECRETS,
];

/// Typed env-derived overrides for `LoggingConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Override for `minLevel`.
    pub min_level: Option<LogLevel>,
    /// Override for `format`.
    pub format: Option<OutputFormat>,
    /// Override for `includeScopes`.
    pub include_scopes: Option<bool>,
    /// Override for `redactSecrets`.
    pub redact_secrets: Option<bool>,
}

impl LoggingEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            min_level: parse_optional_level(map, ENV_MIN_LEVEL)?,
            format: parse_optional_format(map, ENV_FORMAT)?,
            include_scopes: parse_optional_bool(map, ENV_INCLUDE_SCOPES)?,
            redact_secrets: parse_optional_bool(map, ENV_REDACT_SECRETS)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min_level.is_none()
            && self.format.is_none()
            && self.include_scopes.is_none()
            && self.redact_secrets.is_none()
    }
}

/// Apply env overrides on top of `base` and validate the result.
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(level) = env.min_level {
        config.min_level = level;
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(include) = env.include_scopes {
        config.include_scopes = include;
    }
    if let Some(redact) = env.redact_secrets {
        config.redact_secrets = redact;
    }

    config.validate().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value))
            },
        }
    }
}

fn parse_optional_trimmed<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(trimmed) = parse_optional_trimmed(map, var)? else {
        return Ok(None);
    };

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: trimmed.to_string(),
        }),
    }
}

fn parse_optional_level(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<LogLevel>, EnvParseError> {
    parse_optional_trimmed(map, var)?
        .map(|value| {
            value.parse::<LogLevel>().map_err(|_| EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn parse_optional_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<OutputFormat>, EnvParseError> {
    parse_optional_trimmed(map, var)?
        .map(|value| {
            OutputFormat::parse(value).ok_or_else(|| EnvParseError::InvalidEnum {
                var,
                value: value.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_no_overrides() -> Result<(), EnvParseError> {
        let env = LoggingEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn parses_every_override() -> Result<(), EnvParseError> {
        let env = LoggingEnv::from_map(&env_map(&[
            (ENV_MIN_LEVEL, "debug"),
            (ENV_FORMAT, "Text"),
            (ENV_INCLUDE_SCOPES, "off"),
            (ENV_REDACT_SECRETS, " yes "),
        ]))?;
        assert_eq!(env.min_level, Some(LogLevel::Debug));
        assert_eq!(env.format, Some(OutputFormat::Text));
        assert_eq!(env.include_scopes, Some(false));
        assert_eq!(env.redact_secrets, Some(true));
        Ok(())
    }

    #[test]
    fn invalid_values_fail_fast() {
        let error = LoggingEnv::from_map(&env_map(&[(ENV_INCLUDE_SCOPES, "maybe")])).err();
        assert_eq!(
            error,
            Some(EnvParseError::InvalidBool {
                var: ENV_INCLUDE_SCOPES,
                value: "maybe".to_string(),
            })
        );

        let error = LoggingEnv::from_map(&env_map(&[(ENV_MIN_LEVEL, "  ")])).err();
        assert_eq!(error, Some(EnvParseError::EmptyValue { var: ENV_MIN_LEVEL }));
    }

    #[test]
    fn env_error_maps_into_envelope() {
        let Some(error) = LoggingEnv::from_map(&env_map(&[(ENV_FORMAT, "yaml")])).err() else {
            return;
        };
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code, ErrorCode::new("config", "invalid_env_enum"));
        assert_eq!(envelope.metadata.get("env_var"), Some(&ENV_FORMAT.to_string()));
        assert_eq!(envelope.metadata.get("value"), Some(&"yaml".to_string()));
    }

    #[test]
    fn env_overrides_win_over_base() -> Result<(), ErrorEnvelope> {
        let base = LoggingConfig {
            min_level: LogLevel::Error,
            include_scopes: true,
            ..LoggingConfig::default()
        };
        let env = LoggingEnv {
            min_level: Some(LogLevel::Trace),
            include_scopes: Some(false),
            ..LoggingEnv::default()
        };
        let config = apply_env_overrides(base, &env)?;
        assert_eq!(config.min_level, LogLevel::Trace);
        assert!(!config.include_scopes);
        assert_eq!(config.format, OutputFormat::Json);
        Ok(())
    }
}
