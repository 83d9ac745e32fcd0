//! Builds the configured sink.

use crate::log_sink::LogSink;
use crate::logger::JsonLogger;
use crate::text_logger::TextLogger;
use logmsg_config::{OutputFormat, ValidatedLoggingConfig};
use logmsg_ports::LoggerPort;
use std::sync::Arc;

/// Build the rendering logger selected by `config.format`.
#[must_use]
pub fn logger_from_config(
    config: &ValidatedLoggingConfig,
    sink: Arc<dyn LogSink>,
) -> Arc<dyn LoggerPort> {
    match config.format {
        OutputFormat::Json => Arc::new(JsonLogger::from_config(config, sink)),
        OutputFormat::Text => Arc::new(TextLogger::from_config(config, sink)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::MemoryLogSink;
    use logmsg_config::parse_logging_config_json;
    use logmsg_domain::{EventId, LogLevel, LogValues, MessageTemplate};
    use logmsg_ports::{LogEntry, default_formatter};

    fn write_hello(port: &dyn LoggerPort) -> Result<(), Box<dyn std::error::Error>> {
        let state = LogValues::try_new(MessageTemplate::cached("hello")?, Vec::new())?;
        port.log(&LogEntry {
            category: "factory",
            level: LogLevel::Warning,
            event_id: &EventId::new(1),
            state: &state,
            error: None,
            formatter: default_formatter,
        });
        Ok(())
    }

    #[test]
    fn text_format_builds_text_logger() -> Result<(), Box<dyn std::error::Error>> {
        let config = parse_logging_config_json(r#"{"format":"text","minLevel":"warning"}"#)?;
        let sink = Arc::new(MemoryLogSink::new());
        let port = logger_from_config(&config, sink.clone());

        assert!(!port.is_enabled(LogLevel::Information));
        write_hello(port.as_ref())?;
        assert_eq!(sink.take(), ["warn: factory[1]: hello\n"]);
        Ok(())
    }

    #[test]
    fn default_config_builds_json_logger() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemoryLogSink::new());
        let port = logger_from_config(&ValidatedLoggingConfig::default(), sink.clone());

        assert!(port.is_enabled(LogLevel::Information));
        write_hello(port.as_ref())?;
        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        let payload: serde_json::Value = serde_json::from_str(lines[0].trim())?;
        assert_eq!(payload["message"], "hello");
        Ok(())
    }
}
