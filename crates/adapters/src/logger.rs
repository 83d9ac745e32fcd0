//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use crate::render::{
    entry_message, error_json, fields_json, now_epoch_ms, redacted, scope_json,
};
use crate::scope_stack::ScopeStack;
use logmsg_config::ValidatedLoggingConfig;
use logmsg_domain::{LogLevel, LogValues};
use logmsg_ports::{LogEntry, LoggerPort, ScopeGuard};
use serde_json::Value;
use std::sync::Arc;

/// Default number of innermost scopes attached to an entry.
pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 64;

/// JSON logger emitting one line per entry.
///
/// Clones share the sink and the scope stack.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
    include_scopes: bool,
    redact_secrets: bool,
    max_scope_depth: usize,
    scopes: ScopeStack,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            min_level: LogLevel::Information,
            include_scopes: true,
            redact_secrets: true,
            max_scope_depth: DEFAULT_MAX_SCOPE_DEPTH,
            scopes: ScopeStack::new(),
        }
    }

    /// Create a logger from validated configuration.
    #[must_use]
    pub fn from_config(config: &ValidatedLoggingConfig, sink: Arc<dyn LogSink>) -> Self {
        Self::new(sink)
            .with_min_level(config.min_level)
            .with_scopes(config.include_scopes)
            .with_redaction(config.redact_secrets)
            .with_max_scope_depth(config.max_scope_depth())
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Attach active scopes to every entry.
    #[must_use]
    pub const fn with_scopes(mut self, include: bool) -> Self {
        self.include_scopes = include;
        self
    }

    /// Replace values bound to secret-looking keys.
    #[must_use]
    pub const fn with_redaction(mut self, redact: bool) -> Self {
        self.redact_secrets = redact;
        self
    }

    /// Keep at most `depth` innermost scopes per entry.
    #[must_use]
    pub const fn with_max_scope_depth(mut self, depth: usize) -> Self {
        self.max_scope_depth = depth;
        self
    }

    /// Scope stack fed by [`LoggerPort::begin_scope`].
    #[must_use]
    pub const fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    fn payload(&self, entry: &LogEntry<'_>) -> Value {
        let state = redacted(entry.state, self.redact_secrets);

        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::from(entry.level.as_str()));
        payload.insert("category".to_string(), Value::from(entry.category));
        payload.insert("eventId".to_string(), Value::from(entry.event_id.id()));
        if let Some(name) = entry.event_id.name() {
            payload.insert("eventName".to_string(), Value::from(name));
        }
        payload.insert(
            "message".to_string(),
            Value::String(entry_message(entry, &state)),
        );
        payload.insert("fields".to_string(), fields_json(&state));

        if self.include_scopes {
            let scopes = self.scopes.innermost(self.max_scope_depth);
            if !scopes.is_empty() {
                let rendered = scopes
                    .iter()
                    .map(|scope| scope_json(scope, self.redact_secrets))
                    .collect();
                payload.insert("scopes".to_string(), Value::Array(rendered));
            }
        }
        if let Some(error) = entry.error {
            payload.insert("error".to_string(), error_json(error));
        }
        Value::Object(payload)
    }
}

impl LoggerPort for JsonLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }

    fn log(&self, entry: &LogEntry<'_>) {
        if !self.is_enabled(entry.level) {
            return;
        }

        let line = serde_json::to_string(&self.payload(entry)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"category\":\"logmsg\",\"message\":\"log serialization failed\"}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }

    fn begin_scope(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard {
        self.scopes.push(category, state)
    }
}
