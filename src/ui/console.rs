//! Terminal preview sink
//!
//! On an interactive terminal the document panel and status line are
//! redrawn in place; everywhere else each event is appended as a line.

use std::io::{self, Write};

use texview::domain::ports::{DocumentSummary, PreviewEvent, PreviewSink};

use crate::ui::context::UiContext;
use crate::ui::live_region::LiveRegion;
use crate::ui::views::preview::{
    render_document_panel, render_event_line, render_preview_header, render_status, StatusKind,
};

/// Lines kept free for the document panel and the shell prompt
const RESERVED_LINES: u16 = 4;

fn local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

pub struct ConsoleSink<W: Write> {
    out: W,
    ui: UiContext,
    compiler: String,
    region: LiveRegion,
    document: Option<DocumentSummary>,
    status: String,
    kind: StatusKind,
    stamp: String,
    /// Permanent text waiting for the next flush
    pending: Vec<String>,
    dirty: bool,
    stopped: bool,
    clock: fn() -> String,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(ui: UiContext, compiler: impl Into<String>) -> Self {
        Self::new(io::stdout(), ui, compiler)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, ui: UiContext, compiler: impl Into<String>) -> Self {
        Self {
            out,
            ui,
            compiler: compiler.into(),
            region: LiveRegion::new(),
            document: None,
            status: String::new(),
            kind: StatusKind::Idle,
            stamp: String::new(),
            pending: Vec::new(),
            dirty: false,
            stopped: false,
            clock: local_time,
        }
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }

    fn compose(&self) -> String {
        let width = self.ui.caps.width as usize;
        let max_lines = self.ui.caps.height.saturating_sub(RESERVED_LINES).max(3) as usize;

        let mut content = render_document_panel(
            self.document.as_ref(),
            self.ui.color,
            self.ui.unicode,
            width,
        );
        if !self.status.is_empty() {
            content.push_str(&render_status(
                &self.stamp,
                &self.status,
                self.kind,
                self.ui.color,
                self.ui.unicode,
                width,
                max_lines,
            ));
        }
        content
    }

    fn track(&mut self, event: &PreviewEvent) {
        match event {
            PreviewEvent::WatchStarted { master, watching } => {
                self.pending.push(render_preview_header(
                    master,
                    watching,
                    &self.compiler,
                    self.ui.color,
                    self.ui.unicode,
                ));
                self.kind = StatusKind::Idle;
            }
            PreviewEvent::CompileStarted => self.kind = StatusKind::Busy,
            PreviewEvent::CompileFailed { .. } | PreviewEvent::ReloadFailed { .. } => {
                self.kind = StatusKind::Error
            }
            PreviewEvent::DocumentLoaded { document } => {
                self.document = Some(document.clone());
                self.kind = StatusKind::Success;
            }
            PreviewEvent::Status { message } => {
                self.status = message.clone();
                self.stamp = (self.clock)();
            }
            PreviewEvent::Shutdown => self.stopped = true,
        }
    }
}

impl<W: Write> PreviewSink for ConsoleSink<W> {
    fn emit(&mut self, event: PreviewEvent) {
        self.track(&event);

        if !self.ui.live {
            if let PreviewEvent::WatchStarted { .. } = event {
                return;
            }
            let stamp = (self.clock)();
            if let Some(line) = render_event_line(&stamp, &event, self.ui.color, self.ui.unicode) {
                self.pending.push(line);
            }
            return;
        }

        match event {
            PreviewEvent::Shutdown => {
                let stamp = (self.clock)();
                if let Some(line) =
                    render_event_line(&stamp, &event, self.ui.color, self.ui.unicode)
                {
                    self.pending.push(line);
                }
            }
            _ => self.dirty = true,
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.ui.live {
            for text in self.pending.drain(..) {
                self.out.write_all(text.as_bytes())?;
            }
            return self.out.flush();
        }

        if self.stopped {
            // Leave the last panel on screen and print below it
            if self.dirty {
                let content = self.compose();
                self.region.update(&mut self.out, &content)?;
                self.dirty = false;
            }
            self.region = LiveRegion::new();
            for text in self.pending.drain(..) {
                self.out.write_all(text.as_bytes())?;
            }
            return self.out.flush();
        }

        for text in std::mem::take(&mut self.pending) {
            self.region.print_above(&mut self.out, &text)?;
        }
        if self.dirty {
            let content = self.compose();
            self.region.update(&mut self.out, &content)?;
            self.dirty = false;
        }
        Ok(())
    }
}
