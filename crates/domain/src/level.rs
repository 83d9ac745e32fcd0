//! Log severity levels.

use logmsg_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry, ordered from most to least verbose.
///
/// `None` is never enabled; it exists so configuration can switch a sink off.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose diagnostics.
    Trace,
    /// Developer diagnostics.
    Debug,
    /// General flow of the application.
    #[default]
    #[serde(alias = "info")]
    Information,
    /// Abnormal or unexpected events that do not stop the flow.
    #[serde(alias = "warn")]
    Warning,
    /// Failures of the current operation.
    Error,
    /// Unrecoverable failures requiring immediate attention.
    Critical,
    /// Disables logging entirely.
    #[serde(alias = "off")]
    None,
}

impl LogLevel {
    /// All levels in ascending severity.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Information,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::None,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::None => "none",
        }
    }

    /// Returns true when an entry at `self` passes a `minimum` threshold.
    #[must_use]
    pub fn passes(self, minimum: Self) -> bool {
        self != Self::None && minimum != Self::None && self >= minimum
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "information" | "info" => Ok(Self::Information),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            "none" | "off" => Ok(Self::None),
            _ => Err(LevelParseError {
                input: input.to_string(),
            }),
        }
    }
}

/// Unknown log level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// Raw input that failed to parse.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown log level: {}", self.input)
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        Self::expected(
            ErrorCode::new("domain", "invalid_log_level"),
            error.to_string(),
        )
        .with_metadata("input", error.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Critical < LogLevel::None);
    }

    #[test]
    fn passes_honours_threshold_and_none() {
        assert!(LogLevel::Error.passes(LogLevel::Information));
        assert!(!LogLevel::Debug.passes(LogLevel::Information));
        assert!(!LogLevel::None.passes(LogLevel::Trace));
        assert!(!LogLevel::Critical.passes(LogLevel::None));
    }

    #[test]
    fn parses_names_and_aliases() -> Result<(), LevelParseError> {
        assert_eq!("info".parse::<LogLevel>()?, LogLevel::Information);
        assert_eq!(" WARN ".parse::<LogLevel>()?, LogLevel::Warning);
        assert_eq!("off".parse::<LogLevel>()?, LogLevel::None);
        assert!("verbose".parse::<LogLevel>().is_err());
        Ok(())
    }

    #[test]
    fn serde_accepts_the_same_aliases_as_from_str() -> Result<(), serde_json::Error> {
        for (name, level) in [
            ("\"info\"", LogLevel::Information),
            ("\"warn\"", LogLevel::Warning),
            ("\"off\"", LogLevel::None),
        ] {
            assert_eq!(serde_json::from_str::<LogLevel>(name)?, level);
        }
        assert_eq!(serde_json::to_string(&LogLevel::None)?, "\"none\"");
        Ok(())
    }

    #[test]
    fn display_round_trips_through_from_str() -> Result<(), LevelParseError> {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>()?, level);
        }
        Ok(())
    }

    #[test]
    fn parse_error_maps_into_envelope() {
        let Err(error) = "loud".parse::<LogLevel>() else {
            return;
        };
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code.code(), "invalid_log_level");
        assert_eq!(envelope.metadata.get("input"), Some(&"loud".to_string()));
    }
}
