//! Bridge from the logger port onto the `tracing` ecosystem.
//!
//! Writes become `tracing` events under the `logmsg` target and scopes become
//! entered spans, so any installed subscriber (fmt, JSON, OpenTelemetry)
//! receives them.

use crate::render::{entry_message, error_text, fields_json, redacted};
use logmsg_config::ValidatedLoggingConfig;
use logmsg_domain::{LogLevel, LogValues};
use logmsg_ports::{LogEntry, LoggerPort, ScopeGuard};
use std::sync::Arc;

macro_rules! bridge_event {
    ($level:expr, $entry:expr, $fields:expr, $error:expr, $message:expr) => {
        tracing::event!(
            target: "logmsg",
            $level,
            category = $entry.category,
            event_id = $entry.event_id.id(),
            event_name = $entry.event_id.name(),
            fields = %$fields,
            error = $error,
            "{}",
            $message
        )
    };
}

/// Logger port that forwards to the current `tracing` dispatcher.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    min_level: LogLevel,
    redact_secrets: bool,
}

impl TracingLogger {
    /// Bridge every level from [`LogLevel::Trace`] up, with redaction on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_level: LogLevel::Trace,
            redact_secrets: true,
        }
    }

    /// Create a bridge from validated configuration.
    #[must_use]
    pub fn from_config(config: &ValidatedLoggingConfig) -> Self {
        Self {
            min_level: config.min_level,
            redact_secrets: config.redact_secrets,
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Replace values bound to secret-looking keys.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_secrets = redact;
        self
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerPort for TracingLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }

    fn log(&self, entry: &LogEntry<'_>) {
        if !self.is_enabled(entry.level) {
            return;
        }
        let state = redacted(entry.state, self.redact_secrets);
        let message = entry_message(entry, &state);
        let fields = fields_json(&state);
        let error = entry.error.map(error_text);
        let error = error.as_deref();

        match entry.level {
            LogLevel::Trace => {
                bridge_event!(tracing::Level::TRACE, entry, fields, error, message);
            },
            LogLevel::Debug => {
                bridge_event!(tracing::Level::DEBUG, entry, fields, error, message);
            },
            LogLevel::Information => {
                bridge_event!(tracing::Level::INFO, entry, fields, error, message);
            },
            LogLevel::Warning => {
                bridge_event!(tracing::Level::WARN, entry, fields, error, message);
            },
            LogLevel::Error | LogLevel::Critical => {
                bridge_event!(tracing::Level::ERROR, entry, fields, error, message);
            },
            LogLevel::None => {},
        }
    }

    fn begin_scope(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard {
        let state = redacted(&state, self.redact_secrets);
        let span = tracing::info_span!(
            target: "logmsg",
            "scope",
            category = category,
            scope = %state.formatted()
        );
        let entered = span.entered();
        ScopeGuard::new(move || drop(entered))
    }
}
