//! Error envelope types and helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadata attached to errors for diagnostics.
pub type ErrorMetadata = BTreeMap<String, String>;

/// High-level classification of error origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Expected failures (malformed input, bad configuration).
    Expected,
    /// Programming errors caught by an invariant check (e.g. template arity).
    Invariant,
    /// Unexpected failures from external collaborators.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected => formatter.write_str("expected"),
            Self::Invariant => formatter.write_str("invariant"),
            Self::Unexpected => formatter.write_str("unexpected"),
        }
    }
}

/// Retry classification for failure handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The operation can be retried safely.
    Retriable,
    /// The operation should not be retried.
    NonRetriable,
}

impl ErrorClass {
    /// Returns true when the error is considered retriable.
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Retriable)
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retriable => formatter.write_str("retriable"),
            Self::NonRetriable => formatter.write_str("non-retriable"),
        }
    }
}

/// Stable error code with namespace and identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Create a new error code with a namespace and code.
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Invalid input code.
    pub fn invalid_input() -> Self {
        Self::new("core", "invalid_input")
    }

    /// Internal failure code.
    pub fn internal() -> Self {
        Self::new("core", "internal")
    }

    /// Returns the namespace portion.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the code identifier.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error envelope shared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error kind describing the origin category.
    pub kind: ErrorKind,
    /// Retry classification.
    pub class: ErrorClass,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Additional diagnostic metadata.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    /// Create an expected error (never retriable).
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Expected, ErrorClass::NonRetriable, code, message)
    }

    /// Create an invariant error (always non-retriable).
    pub fn invariant(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(ErrorKind::Invariant, ErrorClass::NonRetriable, code, message)
    }

    /// Create an unexpected error with the provided retry classification.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>, class: ErrorClass) -> Self {
        Self::build(ErrorKind::Unexpected, class, code, message)
    }

    fn build(
        kind: ErrorKind,
        class: ErrorClass,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            class,
            code,
            message: message.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Returns true when the error was raised by an invariant check.
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.kind == ErrorKind::Invariant
    }

    /// Attach a single metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {} {}: {}",
            self.kind, self.class, self.code, self.message
        )
    }
}

impl std::error::Error for ErrorEnvelope {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_constructors() {
        let expected = ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid");
        assert_eq!(expected.kind, ErrorKind::Expected);
        assert_eq!(expected.class, ErrorClass::NonRetriable);
        assert_eq!(expected.code, ErrorCode::invalid_input());

        let invariant = ErrorEnvelope::invariant(ErrorCode::internal(), "arity");
        assert!(invariant.is_invariant());
        assert_eq!(invariant.class, ErrorClass::NonRetriable);

        let unexpected =
            ErrorEnvelope::unexpected(ErrorCode::internal(), "sink gone", ErrorClass::Retriable);
        assert_eq!(unexpected.kind, ErrorKind::Unexpected);
        assert!(unexpected.class.is_retriable());
    }

    #[test]
    fn display_includes_code_and_message() {
        let error = ErrorEnvelope::expected(ErrorCode::new("template", "unclosed"), "bad brace");
        assert_eq!(
            error.to_string(),
            "expected non-retriable template:unclosed: bad brace"
        );
    }

    #[test]
    fn metadata_is_serialized_only_when_present() -> Result<(), serde_json::Error> {
        let bare = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad");
        let encoded = serde_json::to_value(&bare)?;
        assert!(encoded.get("metadata").is_none());

        let detailed = bare.with_metadata("position", "4");
        let encoded = serde_json::to_value(&detailed)?;
        assert_eq!(
            encoded.pointer("/metadata/position"),
            Some(&serde_json::Value::from("4"))
        );
        Ok(())
    }
}
