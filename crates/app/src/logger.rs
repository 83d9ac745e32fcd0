//! Logger façade: the call-site handle that forwards to a sink.

use logmsg_domain::{EventId, LogLevel, LogValue, LogValues, MessageTemplate, TemplateError};
use logmsg_ports::{LogEntry, LoggerPort, MessageFormatter, ScopeGuard, default_formatter};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A named handle over a [`LoggerPort`].
///
/// Cloning is cheap; clones share the category and the sink.
#[derive(Clone)]
pub struct Logger {
    category: Arc<str>,
    port: Arc<dyn LoggerPort>,
}

impl Logger {
    /// Create a façade with the given category over `port`.
    pub fn new(category: impl Into<Arc<str>>, port: Arc<dyn LoggerPort>) -> Self {
        Self {
            category: category.into(),
            port,
        }
    }

    /// Category name attached to every write and scope.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Sink behind this façade.
    #[must_use]
    pub fn port(&self) -> &Arc<dyn LoggerPort> {
        &self.port
    }

    /// Returns true when the sink records writes at `level`.
    ///
    /// [`LogLevel::None`] is never enabled and is not forwarded.
    #[must_use]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::None && self.port.is_enabled(level)
    }

    /// Forward a finished write to the sink.
    ///
    /// This does not consult [`Logger::is_enabled`]; callers that build the
    /// payload only for enabled levels check first.
    pub fn write(
        &self,
        level: LogLevel,
        event_id: &EventId,
        state: &LogValues,
        error: Option<&(dyn Error + 'static)>,
        formatter: MessageFormatter,
    ) {
        self.port.log(&LogEntry {
            category: &self.category,
            level,
            event_id,
            state,
            error,
            formatter,
        });
    }

    /// Compile `template` and write it with loosely-typed `values`.
    ///
    /// The template and the value count are validated on every call, whatever
    /// the level. The container is only built and written when the level is
    /// enabled. Templates compiled here are not interned in the
    /// [`TemplateCache`](logmsg_domain::TemplateCache).
    pub fn log(
        &self,
        level: LogLevel,
        event_id: impl Into<EventId>,
        template: &str,
        values: Vec<LogValue>,
        error: Option<&(dyn Error + 'static)>,
    ) -> Result<(), TemplateError> {
        let template = MessageTemplate::parse(template)?;
        template.ensure_arity(values.len())?;
        if !self.is_enabled(level) {
            return Ok(());
        }
        let state = LogValues::try_new(Arc::new(template), values)?;
        self.write(level, &event_id.into(), &state, error, default_formatter);
        Ok(())
    }

    /// Push `state` as ambient context until the returned guard is released.
    pub fn begin_scope(&self, state: LogValues) -> ScopeGuard {
        tracing::trace!(
            category = %self.category,
            template = state.original_format(),
            "scope pushed"
        );
        self.port.begin_scope(&self.category, Arc::new(state))
    }

    /// Compile `template` and push a scope built from loosely-typed `values`.
    ///
    /// Any number of values is accepted as long as it matches the template.
    /// The template is compiled per call and not interned.
    pub fn begin_scope_with(
        &self,
        template: &str,
        values: Vec<LogValue>,
    ) -> Result<ScopeGuard, TemplateError> {
        let state = LogValues::try_new(Arc::new(MessageTemplate::parse(template)?), values)?;
        Ok(self.begin_scope(state))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}
