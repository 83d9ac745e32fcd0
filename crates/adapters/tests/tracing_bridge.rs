//! The `tracing` bridge emits events and spans a subscriber can capture.

use logmsg_adapters::TracingLogger;
use logmsg_domain::{EventId, LogLevel, LogValue, LogValues, MessageTemplate};
use logmsg_ports::{LogEntry, LoggerPort, default_formatter};
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(run: impl FnOnce()) -> Vec<Value> {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::TRACE)
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, run);
    buffer.lines()
}

fn state(template: &str, values: Vec<LogValue>) -> Result<LogValues, Box<dyn std::error::Error>> {
    Ok(LogValues::try_new(MessageTemplate::cached(template)?, values)?)
}

#[test]
fn writes_become_tracing_events_inside_scope_spans() -> Result<(), Box<dyn std::error::Error>> {
    let logger = TracingLogger::new();
    let message = state(
        "User {User} used {ApiKey}",
        vec![LogValue::Str("ada".into()), LogValue::Str("sk-1".into())],
    )?;
    let scope = Arc::new(state("Request {RequestId}", vec![LogValue::UInt(42)])?);
    let failure = io::Error::other("disk full");
    let event_id = EventId::named(5, "KeyUsed");

    let events = capture(|| {
        let _guard = logger.begin_scope("auth", Arc::clone(&scope));
        logger.log(&LogEntry {
            category: "auth",
            level: LogLevel::Critical,
            event_id: &event_id,
            state: &message,
            error: Some(&failure),
            formatter: default_formatter,
        });
    });

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event["level"], "ERROR");
    assert_eq!(event["target"], "logmsg");
    assert_eq!(event["fields"]["message"], "User ada used [REDACTED]");
    assert_eq!(event["fields"]["category"], "auth");
    assert_eq!(event["fields"]["event_id"], 5);
    assert_eq!(event["fields"]["event_name"], "KeyUsed");
    assert_eq!(event["fields"]["error"], "disk full");

    let fields: Value = serde_json::from_str(event["fields"]["fields"].as_str().ok_or("fields")?)?;
    assert_eq!(fields["User"], "ada");
    assert_eq!(fields["ApiKey"], "[REDACTED]");

    assert_eq!(event["span"]["name"], "scope");
    assert_eq!(event["span"]["scope"], "Request 42");
    assert_eq!(event["span"]["category"], "auth");
    Ok(())
}

#[test]
fn filtered_levels_emit_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let logger = TracingLogger::new().with_min_level(LogLevel::Warning);
    let message = state("quiet", Vec::new())?;
    let event_id = EventId::new(1);

    assert!(!logger.is_enabled(LogLevel::Information));
    assert!(!logger.is_enabled(LogLevel::None));
    let events = capture(|| {
        for level in [LogLevel::Debug, LogLevel::Information, LogLevel::None] {
            logger.log(&LogEntry {
                category: "quiet",
                level,
                event_id: &event_id,
                state: &message,
                error: None,
                formatter: default_formatter,
            });
        }
    });

    assert!(events.is_empty());
    Ok(())
}
