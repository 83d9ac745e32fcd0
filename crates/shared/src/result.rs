//! Result alias for shared error handling.

use crate::errors::ErrorEnvelope;

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn result_defaults_to_error_envelope() {
        let failed: Result<u8> = Err(ErrorEnvelope::expected(ErrorCode::invalid_input(), "no"));
        let mapped = failed.map_err(|error| error.with_metadata("field", "minLevel"));

        let Err(error) = mapped else {
            return;
        };
        assert_eq!(
            error.metadata.get("field").map(String::as_str),
            Some("minLevel")
        );
    }
}
