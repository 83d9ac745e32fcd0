//! Structured logging boundary contract.
//!
//! A [`LoggerPort`] is the sink behind a logger façade. It answers the
//! level-enablement query, receives finished [`LogEntry`] writes, and accepts
//! scope pushes that are popped when the returned [`ScopeGuard`] is released.

use logmsg_domain::{EventId, LogLevel, LogValues};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Deferred rendering of a write into human-readable text.
pub type MessageFormatter = fn(&LogValues, Option<&(dyn Error + 'static)>) -> String;

/// Formatter used by typed message definitions: the container's formatted text.
#[must_use]
pub fn default_formatter(state: &LogValues, _error: Option<&(dyn Error + 'static)>) -> String {
    state.formatted().to_owned()
}

/// One log write handed to a sink.
#[derive(Clone, Copy)]
pub struct LogEntry<'a> {
    /// Category of the logger façade that produced the write.
    pub category: &'a str,
    /// Severity.
    pub level: LogLevel,
    /// Event identifier.
    pub event_id: &'a EventId,
    /// Structured payload.
    pub state: &'a LogValues,
    /// Optional error attached at the call site.
    pub error: Option<&'a (dyn Error + 'static)>,
    /// Renders the payload (and error) into text on demand.
    pub formatter: MessageFormatter,
}

impl LogEntry<'_> {
    /// Render the human-readable message through the entry's formatter.
    #[must_use]
    pub fn message(&self) -> String {
        (self.formatter)(self.state, self.error)
    }
}

impl fmt::Debug for LogEntry<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LogEntry")
            .field("category", &self.category)
            .field("level", &self.level)
            .field("event_id", &self.event_id)
            .field("state", &self.state)
            .field("error", &self.error.map(ToString::to_string))
            .finish_non_exhaustive()
    }
}

/// Handle to a pushed scope; dropping or releasing it pops the scope.
///
/// Guards are bound to the thread that created them.
#[must_use = "the scope is popped as soon as the guard is dropped"]
pub struct ScopeGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl ScopeGuard {
    /// Guard that runs `release` exactly once when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release.
    pub const fn noop() -> Self {
        Self { release: None }
    }

    /// Release several guards together, innermost (last) first.
    pub fn combine(guards: Vec<Self>) -> Self {
        Self::new(move || {
            for guard in guards.into_iter().rev() {
                drop(guard);
            }
        })
    }

    /// Pop the scope now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for ScopeGuard {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScopeGuard")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// Boundary contract for a structured log sink.
pub trait LoggerPort: Send + Sync {
    /// Returns true when writes at `level` would be recorded.
    fn is_enabled(&self, level: LogLevel) -> bool;

    /// Record a write. Sinks may assume the level was checked by the caller.
    fn log(&self, entry: &LogEntry<'_>);

    /// Push `state` as ambient context for the current thread.
    fn begin_scope(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard;
}
