//! Event adapter printing pipeline events as JSON lines
//!
//! Bridges block-engine's `EventSink` trait to a byte stream: one compact
//! JSON object per event, newline-terminated. The CLI writes these to stderr
//! so stdout carries only the result.

use std::io::Write;

use block_engine::{EventError, EventSink, PipelineEvent};
use parking_lot::Mutex;

/// Sink that serializes each event onto its own line.
pub struct JsonLinesEventSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesEventSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesEventSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> EventSink for JsonLinesEventSink<W> {
    fn send(&self, event: PipelineEvent) -> Result<(), EventError> {
        let line = serde_json::to_string(&event).map_err(|e| EventError {
            message: format!("Failed to serialize event: {}", e),
        })?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| EventError {
                message: format!("Failed to write event: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_event() {
        let sink = JsonLinesEventSink::new(Vec::new());
        sink.send(PipelineEvent::Start {
            execution_id: "ui-run-1".to_string(),
            command: "make a modal".to_string(),
        })
        .unwrap();
        sink.send(PipelineEvent::Generated {
            execution_id: "ui-run-1".to_string(),
            length: 12,
        })
        .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "start");
        assert_eq!(first["command"], "make a modal");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "generated");
        assert_eq!(second["length"], 12);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let sink = JsonLinesEventSink::new(BrokenPipe);
        let err = sink
            .send(PipelineEvent::Generated {
                execution_id: "ui-run-1".to_string(),
                length: 0,
            })
            .unwrap_err();
        assert!(err.message.starts_with("Failed to write event"));
    }
}
