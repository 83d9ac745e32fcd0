//! In-memory sink implementations for port contracts.
//!
//! These implementations are intended for:
//! - Unit/integration tests of message definitions and scopes
//! - Deterministic contract tests for the ports layer

use logmsg_domain::{EventId, LogLevel, LogValues};
use logmsg_ports::{LogEntry, LoggerPort, ScopeGuard};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A sink that reports every level disabled and ignores scopes.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _entry: &LogEntry<'_>) {}

    fn begin_scope(&self, _category: &str, _state: Arc<LogValues>) -> ScopeGuard {
        ScopeGuard::noop()
    }
}

/// One write captured by [`TestSink`].
#[derive(Debug, Clone)]
pub struct WriteContext {
    /// Category of the façade that wrote.
    pub category: String,
    /// Severity.
    pub level: LogLevel,
    /// Event identifier.
    pub event_id: EventId,
    /// Structured payload.
    pub state: LogValues,
    /// Display text of the attached error, if any.
    pub error: Option<String>,
    /// Text produced by the entry's formatter.
    pub message: String,
}

/// One scope push captured by [`TestSink`].
#[derive(Debug, Clone)]
pub struct ScopeContext {
    /// Category of the façade that pushed the scope.
    pub category: String,
    /// Structured payload.
    pub state: Arc<LogValues>,
}

/// Recording sink for tests.
///
/// Captures every write and scope push, counts `is_enabled` queries, and
/// tracks how many scope guards are still alive.
#[derive(Debug)]
pub struct TestSink {
    enabled: AtomicBool,
    is_enabled_calls: AtomicUsize,
    writes: Mutex<Vec<WriteContext>>,
    scopes: Mutex<Vec<ScopeContext>>,
    active_scopes: Arc<AtomicUsize>,
}

impl TestSink {
    /// Create a sink with every level enabled.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            is_enabled_calls: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
            scopes: Mutex::new(Vec::new()),
            active_scopes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Switch every level on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Number of `is_enabled` queries received.
    pub fn is_enabled_calls(&self) -> usize {
        self.is_enabled_calls.load(Ordering::SeqCst)
    }

    /// Captured writes, oldest first.
    pub fn writes(&self) -> Vec<WriteContext> {
        self.writes.lock().expect("writes lock").clone()
    }

    /// Captured scope pushes, oldest first.
    pub fn scopes(&self) -> Vec<ScopeContext> {
        self.scopes.lock().expect("scopes lock").clone()
    }

    /// Scope guards that have not been released yet.
    pub fn active_scopes(&self) -> usize {
        self.active_scopes.load(Ordering::SeqCst)
    }

    /// Forget captured writes, scopes, and query counts.
    pub fn clear(&self) {
        self.writes.lock().expect("writes lock").clear();
        self.scopes.lock().expect("scopes lock").clear();
        self.is_enabled_calls.store(0, Ordering::SeqCst);
    }
}

impl Default for TestSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerPort for TestSink {
    fn is_enabled(&self, _level: LogLevel) -> bool {
        self.is_enabled_calls.fetch_add(1, Ordering::SeqCst);
        self.enabled.load(Ordering::SeqCst)
    }

    fn log(&self, entry: &LogEntry<'_>) {
        let write = WriteContext {
            category: entry.category.to_string(),
            level: entry.level,
            event_id: entry.event_id.clone(),
            state: entry.state.clone(),
            error: entry.error.map(ToString::to_string),
            message: entry.message(),
        };
        self.writes.lock().expect("writes lock").push(write);
    }

    fn begin_scope(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard {
        self.scopes.lock().expect("scopes lock").push(ScopeContext {
            category: category.to_string(),
            state,
        });
        self.active_scopes.fetch_add(1, Ordering::SeqCst);
        let active = Arc::clone(&self.active_scopes);
        ScopeGuard::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmsg_domain::{LogValue, MessageTemplate};
    use logmsg_ports::default_formatter;

    fn state(text: &str, values: Vec<LogValue>) -> LogValues {
        LogValues::try_new(MessageTemplate::cached(text).unwrap(), values).unwrap()
    }

    #[test]
    fn records_writes_with_rendered_message() {
        let sink = TestSink::new();
        let payload = state("Hello {name}", vec![LogValue::Str("world".into())]);
        let event_id = EventId::named(4, "Greeting");
        sink.log(&LogEntry {
            category: "tests",
            level: LogLevel::Information,
            event_id: &event_id,
            state: &payload,
            error: None,
            formatter: default_formatter,
        });

        let writes = sink.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].message, "Hello world");
        assert_eq!(writes[0].event_id.name(), Some("Greeting"));
        assert!(writes[0].error.is_none());
    }

    #[test]
    fn tracks_live_scope_guards() {
        let sink = TestSink::new();
        let outer = sink.begin_scope("tests", Arc::new(state("outer", Vec::new())));
        let inner = sink.begin_scope("tests", Arc::new(state("inner", Vec::new())));
        assert_eq!(sink.active_scopes(), 2);
        drop(outer);
        assert_eq!(sink.active_scopes(), 1);
        drop(inner);
        assert_eq!(sink.active_scopes(), 0);
        assert_eq!(sink.scopes().len(), 2);
    }

    #[test]
    fn counts_enablement_queries() {
        let sink = TestSink::new();
        sink.set_enabled(false);
        assert!(!sink.is_enabled(LogLevel::Critical));
        assert_eq!(sink.is_enabled_calls(), 1);
        sink.clear();
        assert_eq!(sink.is_enabled_calls(), 0);
    }

    #[test]
    fn noop_logger_is_disabled() {
        assert!(!NoopLogger.is_enabled(LogLevel::Critical));
    }
}
