//! Preview Event Port
//!
//! The preview surface reports everything it shows through a sink. Sinks
//! decide how to present it: a live terminal region, an NDJSON stream, or
//! nothing at all.

use serde::Serialize;

use super::view::DocumentSummary;

/// Event emitted by the preview surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PreviewEvent {
    /// Watching began
    WatchStarted { master: String, watching: Vec<String> },
    /// A compilation is running
    CompileStarted,
    /// The last compilation failed
    CompileFailed { message: String },
    /// The compile succeeded but its rendering could not be reopened
    ReloadFailed { message: String },
    /// A rendering was (re)loaded
    DocumentLoaded { document: DocumentSummary },
    /// Status text changed (may contain `<b>`/`<i>` markup)
    Status { message: String },
    /// Watching stopped
    Shutdown,
}

impl PreviewEvent {
    /// Convert to a JSON line with a "command": "preview" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("preview"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Receives preview events
pub trait PreviewSink {
    /// Handle a preview event
    fn emit(&mut self, event: PreviewEvent);

    /// Push pending UI updates to the screen before a blocking step
    fn flush(&mut self) -> std::io::Result<()>;
}

/// No-op sink for silent operation
pub struct NoopSink;

impl PreviewSink for NoopSink {
    fn emit(&mut self, _event: PreviewEvent) {}

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
