//! Shared rendering helpers for the output sinks.

use crate::scope_stack::ActiveScope;
use logmsg_domain::{LogValue, LogValues};
use logmsg_ports::LogEntry;
use logmsg_shared::{REDACTED, is_secret_key};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

/// Copy of `state` with secret-looking values replaced, or `state` itself
/// when nothing needs hiding.
pub fn redacted(state: &LogValues, redact: bool) -> Cow<'_, LogValues> {
    let has_secret = || {
        state
            .iter()
            .any(|pair| !pair.is_original_format() && is_secret_key(pair.key))
    };
    if redact && has_secret() {
        Cow::Owned(state.map_values(|key, value| {
            if is_secret_key(key) {
                LogValue::Str(REDACTED.into())
            } else {
                value.clone()
            }
        }))
    } else {
        Cow::Borrowed(state)
    }
}

/// Message text of `entry`, rendered from the redacted payload.
pub fn entry_message(entry: &LogEntry<'_>, state: &LogValues) -> String {
    (entry.formatter)(state, entry.error)
}

/// Pairs as a JSON object; repeated keys collect into an array.
pub fn fields_json(state: &LogValues) -> Value {
    let mut map = Map::new();
    let mut repeated: Vec<&str> = Vec::new();
    for pair in state {
        let value = serde_json::to_value(pair.value).unwrap_or_default();
        if repeated.contains(&pair.key) {
            if let Some(Value::Array(items)) = map.get_mut(pair.key) {
                items.push(value);
            }
        } else if let Some(existing) = map.get_mut(pair.key) {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
            repeated.push(pair.key);
        } else {
            map.insert(pair.key.to_string(), value);
        }
    }
    Value::Object(map)
}

/// One scope as a JSON object.
pub fn scope_json(scope: &ActiveScope, redact: bool) -> Value {
    let state = redacted(&scope.state, redact);
    let mut map = Map::new();
    map.insert("category".to_string(), Value::from(&*scope.category));
    map.insert("message".to_string(), Value::from(state.formatted()));
    map.insert("fields".to_string(), fields_json(&state));
    Value::Object(map)
}

/// Messages of every `source()` below `error`, nearest first.
pub fn error_sources(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut sources = Vec::new();
    let mut current = error.source();
    while let Some(source) = current {
        sources.push(source.to_string());
        current = source.source();
    }
    sources
}

/// Error message and source chain as a JSON object.
pub fn error_json(error: &(dyn Error + 'static)) -> Value {
    let mut map = Map::new();
    map.insert("message".to_string(), Value::from(error.to_string()));
    let sources = error_sources(error);
    if !sources.is_empty() {
        map.insert(
            "sources".to_string(),
            Value::Array(sources.into_iter().map(Value::from).collect()),
        );
    }
    Value::Object(map)
}

/// Error message followed by its sources, joined by `" <- "`.
pub fn error_text(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    for source in error_sources(error) {
        text.push_str(" <- ");
        text.push_str(&source);
    }
    text
}

/// Milliseconds since the Unix epoch, or zero when the clock is unusable.
pub fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}
