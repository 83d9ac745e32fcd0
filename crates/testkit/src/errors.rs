//! Test fixtures for template error codes and envelopes.

use logmsg_domain::TemplateError;
use logmsg_shared::{ErrorCode, ErrorEnvelope};

/// Error codes a template can fail with.
pub fn template_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::new("template", "unbalanced_braces"),
        ErrorCode::new("template", "empty_placeholder"),
        ErrorCode::new("template", "arity_mismatch"),
    ]
}

/// An arity mismatch for a one-placeholder template declared with two arguments.
pub fn arity_mismatch_error() -> TemplateError {
    TemplateError::ArityMismatch {
        template: "Only {one}".into(),
        expected: 2,
        found: 1,
    }
}

/// An unclosed placeholder envelope.
pub fn unclosed_placeholder_envelope() -> ErrorEnvelope {
    TemplateError::UnclosedPlaceholder { position: 4 }.into()
}
