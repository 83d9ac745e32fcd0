//! Typed log message definitions.
//!
//! A definition binds a level, an event id, and a compiled template to a
//! fixed positional signature. The template is compiled and its arity checked
//! once, when the definition is created; invoking it never re-parses.

use crate::args::LogArgs;
use crate::logger::Logger;
use logmsg_domain::{EventId, LogLevel, LogValues, MessageTemplate, TemplateError, ToLogValue};
use logmsg_ports::{MessageFormatter, default_formatter};
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A reusable log action with positional arguments `A`.
pub struct LogMessage<A> {
    level: LogLevel,
    event_id: EventId,
    template: Arc<MessageTemplate>,
    formatter: MessageFormatter,
    args: PhantomData<fn(A)>,
}

impl<A: LogArgs> LogMessage<A> {
    /// Compile `template` and bind it to `level` and `event_id`.
    ///
    /// Fails when the template is malformed or its placeholder count differs
    /// from the arity of `A`.
    pub fn define(
        level: LogLevel,
        event_id: impl Into<EventId>,
        template: &str,
    ) -> Result<Self, TemplateError> {
        let template = MessageTemplate::cached(template)?;
        template.ensure_arity(A::ARITY)?;
        Ok(Self {
            level,
            event_id: event_id.into(),
            template,
            formatter: default_formatter,
            args: PhantomData,
        })
    }

    /// Replace the formatter handed to sinks with each write.
    #[must_use]
    pub fn with_formatter(mut self, formatter: MessageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Level of every write.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Event id of every write.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Compiled template.
    #[must_use]
    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Write one entry through `logger`.
    ///
    /// When the level is disabled nothing is captured or allocated.
    pub fn log(&self, logger: &Logger, args: A, error: Option<&(dyn Error + 'static)>) {
        if !logger.is_enabled(self.level) {
            return;
        }
        match LogValues::try_new(Arc::clone(&self.template), args.into_values()) {
            Ok(state) => logger.write(self.level, &self.event_id, &state, error, self.formatter),
            Err(bind_error) => tracing::error!(
                category = logger.category(),
                template = self.template.text(),
                error = %bind_error,
                "log message arguments did not match the template"
            ),
        }
    }
}

impl<A> Clone for LogMessage<A> {
    fn clone(&self) -> Self {
        Self {
            level: self.level,
            event_id: self.event_id.clone(),
            template: Arc::clone(&self.template),
            formatter: self.formatter,
            args: PhantomData,
        }
    }
}

impl<A> fmt::Debug for LogMessage<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LogMessage")
            .field("level", &self.level)
            .field("event_id", &self.event_id)
            .field("template", &self.template.text())
            .finish_non_exhaustive()
    }
}

/// Define a log action without arguments.
pub fn define0(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<()>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with one argument.
pub fn define1<T0: ToLogValue>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0,)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with two arguments.
pub fn define2<T0: ToLogValue, T1: ToLogValue>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0, T1)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with three arguments.
pub fn define3<T0: ToLogValue, T1: ToLogValue, T2: ToLogValue>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0, T1, T2)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with four arguments.
pub fn define4<T0: ToLogValue, T1: ToLogValue, T2: ToLogValue, T3: ToLogValue>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0, T1, T2, T3)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with five arguments.
pub fn define5<T0: ToLogValue, T1: ToLogValue, T2: ToLogValue, T3: ToLogValue, T4: ToLogValue>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0, T1, T2, T3, T4)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}

/// Define a log action with six arguments.
pub fn define6<
    T0: ToLogValue,
    T1: ToLogValue,
    T2: ToLogValue,
    T3: ToLogValue,
    T4: ToLogValue,
    T5: ToLogValue,
>(
    level: LogLevel,
    event_id: impl Into<EventId>,
    template: &str,
) -> Result<LogMessage<(T0, T1, T2, T3, T4, T5)>, TemplateError> {
    LogMessage::define(level, event_id, template)
}
