//! Human-readable single-line logger adapter.
//!
//! Lines follow the console layout familiar from .NET hosts:
//!
//! ```text
//! info: auth[3] => Request 42 => Transaction 7: User ada logged in | error: request failed <- connection reset
//! ```

use crate::log_sink::LogSink;
use crate::logger::DEFAULT_MAX_SCOPE_DEPTH;
use crate::render::{entry_message, error_text, redacted};
use crate::scope_stack::ScopeStack;
use logmsg_config::ValidatedLoggingConfig;
use logmsg_domain::{LogLevel, LogValues};
use logmsg_ports::{LogEntry, LoggerPort, ScopeGuard};
use std::fmt::Write;
use std::sync::Arc;

/// Four-letter level tag used at the start of each line.
#[must_use]
pub const fn short_level(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trce",
        LogLevel::Debug => "dbug",
        LogLevel::Information => "info",
        LogLevel::Warning => "warn",
        LogLevel::Error => "fail",
        LogLevel::Critical => "crit",
        LogLevel::None => "none",
    }
}

/// Text logger emitting one line per entry.
#[derive(Clone)]
pub struct TextLogger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
    include_scopes: bool,
    redact_secrets: bool,
    max_scope_depth: usize,
    scopes: ScopeStack,
}

impl TextLogger {
    /// Create a text logger backed by the provided sink.
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
        Self {
            min_level: config.min_level,
            include_scopes: config.include_scopes,
            redact_secrets: config.redact_secrets,
            max_scope_depth: config.max_scope_depth(),
            ..Self::new(sink)
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Prefix every line with the active scopes.
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

    fn render(&self, entry: &LogEntry<'_>) -> String {
        let state = redacted(entry.state, self.redact_secrets);
        let mut line = format!(
            "{}: {}[{}]",
            short_level(entry.level),
            entry.category,
            entry.event_id.id()
        );
        if self.include_scopes {
            for scope in self.scopes.innermost(self.max_scope_depth) {
                let scope_state = redacted(&scope.state, self.redact_secrets);
                let _ = write!(line, " => {}", scope_state.formatted());
            }
        }
        let _ = write!(line, ": {}", entry_message(entry, &state));
        if let Some(error) = entry.error {
            let _ = write!(line, " | error: {}", error_text(error));
        }
        line.push('\n');
        line
    }
}

impl LoggerPort for TextLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }

    fn log(&self, entry: &LogEntry<'_>) {
        if self.is_enabled(entry.level) {
            self.sink.write_line(&self.render(entry));
        }
    }

    fn begin_scope(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard {
        self.scopes.push(category, state)
    }
}
