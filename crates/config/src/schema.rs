//! Logging configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.

use logmsg_domain::LogLevel;
use logmsg_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const MAX_SCOPE_DEPTH_MIN: u32 = 1;
const MAX_SCOPE_DEPTH_MAX: u32 = 1_024;
const MAX_SCOPE_DEPTH_DEFAULT: u32 = 64;

/// Rendering used by line-oriented sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable single line per entry.
    Text,
}

impl OutputFormat {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }

    /// Parse a format name (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Lowest level that is written.
    pub min_level: LogLevel,
    /// Line rendering.
    pub format: OutputFormat,
    /// Attach active scopes to every written line.
    pub include_scopes: bool,
    /// Replace values under secret-looking keys with a placeholder.
    pub redact_secrets: bool,
    /// Number of innermost scopes rendered per line.
    pub max_scope_depth: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            min_level: LogLevel::Information,
            format: OutputFormat::Json,
            include_scopes: true,
            redact_secrets: true,
            max_scope_depth: MAX_SCOPE_DEPTH_DEFAULT,
        }
    }
}

impl LoggingConfig {
    /// Validate the config.
    pub fn validate(self) -> Result<ValidatedLoggingConfig, ConfigSchemaError> {
        self.validate_version()?;
        let max_scope_depth = bounded_u32(
            "logging",
            "maxScopeDepth",
            self.max_scope_depth,
            MAX_SCOPE_DEPTH_MIN,
            MAX_SCOPE_DEPTH_MAX,
        )?;
        Ok(ValidatedLoggingConfig {
            raw: self,
            max_scope_depth,
        })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggingConfig {
    raw: LoggingConfig,
    max_scope_depth: usize,
}

impl ValidatedLoggingConfig {
    /// Validated scope depth as a collection length.
    #[must_use]
    pub const fn max_scope_depth(&self) -> usize {
        self.max_scope_depth
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggingConfig {
        self.raw
    }
}

impl Default for ValidatedLoggingConfig {
    fn default() -> Self {
        Self {
            raw: LoggingConfig::default(),
            max_scope_depth: MAX_SCOPE_DEPTH_DEFAULT as usize,
        }
    }
}

impl AsRef<LoggingConfig> for ValidatedLoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggingConfig {
    type Target = LoggingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse a logging config from a JSON string, applying validation.
pub fn parse_logging_config_json(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Parse a logging config from a TOML string, applying validation.
pub fn parse_logging_config_toml(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Config validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this crate.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `logging`).
        section: &'static str,
        /// Field name in the config file (e.g. `maxScopeDepth`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

fn bounded_u32(
    section: &'static str,
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<usize, ConfigSchemaError> {
    let out_of_range = || ConfigSchemaError::LimitOutOfRange {
        section,
        field,
        value: u64::from(value),
        min: u64::from(min),
        max: u64::from(max),
    };
    if !(min..=max).contains(&value) {
        return Err(out_of_range());
    }
    usize::try_from(value).map_err(|_| out_of_range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn defaults_are_valid() -> Result<(), ConfigSchemaError> {
        let config = LoggingConfig::default().validate()?;
        assert_eq!(config.min_level, LogLevel::Information);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.include_scopes);
        assert!(config.redact_secrets);
        assert_eq!(config.max_scope_depth(), 64);
        assert_eq!(config, ValidatedLoggingConfig::default());
        Ok(())
    }

    #[test]
    fn partial_json_fills_defaults() -> Result<(), ErrorEnvelope> {
        let config = parse_logging_config_json(r#"{ "minLevel": "warn", "format": "text" }"#)?;
        assert_eq!(config.min_level, LogLevel::Warning);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.version, CURRENT_CONFIG_VERSION);
        Ok(())
    }

    #[test]
    fn off_disables_logging_in_files_as_in_env() -> Result<(), ErrorEnvelope> {
        let json = parse_logging_config_json(r#"{ "minLevel": "off" }"#)?;
        assert_eq!(json.min_level, LogLevel::None);
        let toml = parse_logging_config_toml("minLevel = \"off\"\n")?;
        assert_eq!(toml.min_level, LogLevel::None);
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = parse_logging_config_json(r#"{ "minLvl": "warn" }"#).err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "invalid_json"))
        );
    }

    #[test]
    fn version_mismatch_maps_to_envelope() {
        let error = parse_logging_config_toml("version = 2").err();
        let Some(error) = error else {
            return;
        };
        assert_eq!(error.code, ErrorCode::new("config", "unsupported_version"));
        assert_eq!(error.metadata.get("found"), Some(&"2".to_string()));
    }

    #[test]
    fn scope_depth_is_bounded() -> Result<(), Box<dyn Error>> {
        let config = LoggingConfig {
            max_scope_depth: 0,
            ..LoggingConfig::default()
        };
        let error = config.validate().err();
        assert!(matches!(
            error,
            Some(ConfigSchemaError::LimitOutOfRange {
                field: "maxScopeDepth",
                value: 0,
                ..
            })
        ));

        let config = parse_logging_config_toml("maxScopeDepth = 1024")?;
        assert_eq!(config.max_scope_depth(), 1_024);
        Ok(())
    }

    #[test]
    fn output_format_parses_names() {
        assert_eq!(OutputFormat::parse(" TEXT "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
