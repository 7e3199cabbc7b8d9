use std::io::Write;
use std::sync::Mutex;
use serde::Serialize;
use tracing::{info, warn};

/// Payload of a `process-progress` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPayload {
    /// Position of this task in the batch (1-based)
    pub current: usize,
    /// Total number of tasks in the batch
    pub total: usize,
    /// Display name of the task
    pub file: String,
}

/// Payload of a `process-error` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub file: String,
    pub error: String,
}

/// Notification emitted by the batch runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    /// A task is about to be transformed
    Progress(ProgressPayload),
    /// A task failed
    Error(ErrorPayload),
    /// Every task has reported; emitted once per batch
    Complete,
}

impl BatchEvent {
    pub fn progress(current: usize, total: usize, file: impl Into<String>) -> Self {
        Self::Progress(ProgressPayload { current, total, file: file.into() })
    }

    pub fn error(file: impl Into<String>, error: impl ToString) -> Self {
        Self::Error(ErrorPayload { file: file.into(), error: error.to_string() })
    }

    /// Event name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Progress(_) => "process-progress",
            Self::Error(_) => "process-error",
            Self::Complete => "process-complete",
        }
    }

    /// Event payload as JSON, `null` for `Complete`.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::Progress(p) => serde_json::json!(p),
            Self::Error(e) => serde_json::json!(e),
            Self::Complete => serde_json::Value::Null,
        }
    }
}

/// Receiver of batch notifications.
///
/// Called from any worker thread. Emission is fire-and-forget: nothing is
/// returned and nobody has to be listening.
pub trait NotificationSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn emit(&self, _event: BatchEvent) {}
}

/// Reports events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&self, event: BatchEvent) {
        match event {
            BatchEvent::Progress(p) => info!("[{}/{}] {}", p.current, p.total, p.file),
            BatchEvent::Error(e) => warn!("{} failed: {}", e.file, e.error),
            BatchEvent::Complete => info!("Batch complete"),
        }
    }
}

/// Writes each event as one JSON object per line:
/// `{"event": "process-progress", "payload": {...}}`.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> NotificationSink for JsonLinesSink<W> {
    fn emit(&self, event: BatchEvent) {
        let line = serde_json::json!({
            "event": event.name(),
            "payload": event.payload(),
        });

        // Poisoned only if another emit panicked mid-write
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
            warn!("Failed to write {} event: {}", event.name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_wire_protocol() {
        assert_eq!(BatchEvent::progress(1, 2, "a.png").name(), "process-progress");
        assert_eq!(BatchEvent::error("a.png", "boom").name(), "process-error");
        assert_eq!(BatchEvent::Complete.name(), "process-complete");
    }

    #[test]
    fn json_lines_sink_writes_one_object_per_event() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.emit(BatchEvent::progress(1, 3, "a.png"));
        sink.emit(BatchEvent::error("a.png", "cannot decode"));
        sink.emit(BatchEvent::Complete);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            serde_json::json!({
                "event": "process-progress",
                "payload": {"current": 1, "total": 3, "file": "a.png"}
            })
        );
        assert_eq!(
            lines[1]["payload"],
            serde_json::json!({"file": "a.png", "error": "cannot decode"})
        );
        assert_eq!(lines[2], serde_json::json!({"event": "process-complete", "payload": null}));
    }
}
