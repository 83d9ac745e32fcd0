//! Secret detection and redaction utilities.
//!
//! Rendering sinks use these helpers so that structured values bound to
//! secret-looking keys never reach an output stream in clear text.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Checks if a key/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use logmsg_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("LOGMSG_SINK_AUTH"));
/// assert!(!is_secret_key("RequestId"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    ["KEY", "TOKEN", "SECRET", "PASSWORD", "CREDENTIAL", "AUTH"]
        .iter()
        .any(|marker| key.contains(marker))
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use logmsg_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("token", "abc"), "[REDACTED]");
/// assert_eq!(redact_if_secret("controller", "home"), "home");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}
