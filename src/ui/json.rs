use std::io::{self, Write};

use texview::domain::ports::{PreviewEvent, PreviewSink};
use tracing::warn;

/// Write a single NDJSON line.
pub fn write_line(out: &mut impl Write, line: &str) -> io::Result<()> {
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit a raw JSON value to stdout (used before the preview starts).
pub fn emit(value: serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let mut out = io::stdout().lock();
    write_line(&mut out, &line)?;
    out.flush()
}

/// Preview sink that streams every event as one JSON object per line
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> PreviewSink for JsonSink<W> {
    fn emit(&mut self, event: PreviewEvent) {
        if let Err(e) = write_line(&mut self.out, &event.to_json()) {
            warn!(error = %e, "failed to write event");
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
