//! Typed scope definitions.

use crate::args::LogArgs;
use crate::logger::Logger;
use logmsg_domain::{LogValues, MessageTemplate, TemplateError, ToLogValue};
use logmsg_ports::ScopeGuard;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A reusable scope builder with positional arguments `A`.
///
/// Scopes are not gated by level: every call builds its payload and pushes it.
pub struct ScopeMessage<A> {
    template: Arc<MessageTemplate>,
    args: PhantomData<fn(A)>,
}

impl<A: LogArgs> ScopeMessage<A> {
    /// Compile `template`, checking its placeholder count against `A`.
    pub fn define(template: &str) -> Result<Self, TemplateError> {
        let template = MessageTemplate::cached(template)?;
        template.ensure_arity(A::ARITY)?;
        Ok(Self {
            template,
            args: PhantomData,
        })
    }

    /// Compiled template.
    #[must_use]
    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Push a scope on `logger` until the returned guard is released.
    pub fn begin(&self, logger: &Logger, args: A) -> ScopeGuard {
        match LogValues::try_new(Arc::clone(&self.template), args.into_values()) {
            Ok(state) => logger.begin_scope(state),
            Err(bind_error) => {
                tracing::error!(
                    category = logger.category(),
                    template = self.template.text(),
                    error = %bind_error,
                    "scope arguments did not match the template"
                );
                ScopeGuard::noop()
            },
        }
    }
}

impl<A> Clone for ScopeMessage<A> {
    fn clone(&self) -> Self {
        Self {
            template: Arc::clone(&self.template),
            args: PhantomData,
        }
    }
}

impl<A> fmt::Debug for ScopeMessage<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ScopeMessage")
            .field("template", &self.template.text())
            .finish_non_exhaustive()
    }
}

/// Define a scope without arguments.
pub fn define_scope0(template: &str) -> Result<ScopeMessage<()>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with one argument.
pub fn define_scope1<T0: ToLogValue>(
    template: &str,
) -> Result<ScopeMessage<(T0,)>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with two arguments.
pub fn define_scope2<T0: ToLogValue, T1: ToLogValue>(
    template: &str,
) -> Result<ScopeMessage<(T0, T1)>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with three arguments.
pub fn define_scope3<T0: ToLogValue, T1: ToLogValue, T2: ToLogValue>(
    template: &str,
) -> Result<ScopeMessage<(T0, T1, T2)>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with four arguments.
pub fn define_scope4<T0: ToLogValue, T1: ToLogValue, T2: ToLogValue, T3: ToLogValue>(
    template: &str,
) -> Result<ScopeMessage<(T0, T1, T2, T3)>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with five arguments.
pub fn define_scope5<
    T0: ToLogValue,
    T1: ToLogValue,
    T2: ToLogValue,
    T3: ToLogValue,
    T4: ToLogValue,
>(
    template: &str,
) -> Result<ScopeMessage<(T0, T1, T2, T3, T4)>, TemplateError> {
    ScopeMessage::define(template)
}

/// Define a scope with six arguments.
pub fn define_scope6<
    T0: ToLogValue,
    T1: ToLogValue,
    T2: ToLogValue,
    T3: ToLogValue,
    T4: ToLogValue,
    T5: ToLogValue,
>(
    template: &str,
) -> Result<ScopeMessage<(T0, T1, T2, T3, T4, T5)>, TemplateError> {
    ScopeMessage::define(template)
}
