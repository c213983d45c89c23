//! Preview Surface
//!
//! Shows the most recent successful rendering of the master document and
//! surfaces compile errors. The surface subscribes to every watched file it is
//! given and reloads the rendering when a compilation finishes cleanly.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    CompileListener, DocumentView, PreviewEvent, PreviewSink, SharedListener, SizingMode,
};
use crate::domain::rendered_artifact_path;
use crate::error::PreviewResult;

use super::watched_file::WatchedFile;

pub const RELOADING_MESSAGE: &str = "Reloading file...";
pub const LOADED_MESSAGE: &str = "Document loaded";
pub const ERROR_HEADING: &str = "<b>An error occurred during the compilation</b>:";
pub const RELOAD_ERROR_HEADING: &str = "<b>Cannot reload the document</b>:";

/// Where the surface is in its compile/reload cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Idle,
    Reloading,
    Displaying,
    ErrorShown,
}

pub struct PreviewSurface<V, S> {
    view: V,
    sink: S,
    output_extension: String,
    /// Artifact currently displayed
    rendering: Option<PathBuf>,
    files: Vec<Rc<WatchedFile>>,
    state: SurfaceState,
    /// Nesting depth of start notifications. An included file wraps its
    /// master's notifications, so one compile can arrive as two nested pairs.
    in_flight: usize,
}

impl<V, S> PreviewSurface<V, S>
where
    V: DocumentView + 'static,
    S: PreviewSink + 'static,
{
    pub fn new(view: V, sink: S, output_extension: impl Into<String>) -> Self {
        Self {
            view,
            sink,
            output_extension: output_extension.into(),
            rendering: None,
            files: Vec::new(),
            state: SurfaceState::Idle,
            in_flight: 0,
        }
    }

    /// Wrap in the shared handle watched files hold as a listener
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Track `file`, subscribe to its compile notifications and load the
    /// rendering of its master document.
    pub fn add_watched_file(surface: &Rc<RefCell<Self>>, file: Rc<WatchedFile>) -> PreviewResult<()> {
        let master = file.get_master()?;
        let listener: SharedListener = surface.clone();
        file.subscribe(listener);

        let artifact = {
            let mut this = surface.borrow_mut();
            this.files.push(file);
            rendered_artifact_path(master.path(), &this.output_extension)
        };
        surface.borrow_mut().load_rendering(&artifact)
    }

    /// Open the artifact at `path`, reset sizing to best fit, report success.
    pub fn load_rendering(&mut self, path: &Path) -> PreviewResult<()> {
        self.open_rendering(path)?;
        self.state = SurfaceState::Displaying;
        self.announce_document();
        Ok(())
    }

    fn open_rendering(&mut self, path: &Path) -> PreviewResult<()> {
        self.view.open(path)?;
        self.view.set_sizing(SizingMode::BestFit);
        self.rendering = Some(path.to_path_buf());
        info!(path = %path.display(), "rendering loaded");
        Ok(())
    }

    fn announce_document(&mut self) {
        if let Some(document) = self.view.summary() {
            self.sink.emit(PreviewEvent::DocumentLoaded { document });
        }
        self.show_message(LOADED_MESSAGE);
    }

    /// React to a finished compilation.
    ///
    /// On error the message is shown and the current rendering is left
    /// untouched. Otherwise the rendering is reloaded from the same path and
    /// the page position restored.
    pub fn reload_rendering(&mut self, error: Option<&str>) -> PreviewResult<()> {
        if let Some(message) = error {
            self.state = SurfaceState::ErrorShown;
            self.sink.emit(PreviewEvent::CompileFailed {
                message: message.to_string(),
            });
            self.show_message(&format!("{}\n{}", ERROR_HEADING, message));
            return Ok(());
        }

        let Some(path) = self.rendering.clone() else {
            debug!("no rendering loaded, nothing to reload");
            self.state = SurfaceState::Idle;
            return Ok(());
        };

        let page = self.view.page();
        self.open_rendering(&path)?;
        self.view.set_page(page);
        self.state = SurfaceState::Displaying;
        self.announce_document();
        Ok(())
    }

    /// Set the status text and push it to the screen right away, so it is
    /// visible before a blocking compile starts.
    pub fn show_message(&mut self, text: &str) {
        self.sink.emit(PreviewEvent::Status {
            message: text.to_string(),
        });
        if let Err(e) = self.sink.flush() {
            warn!(error = %e, "failed to flush status");
        }
    }

    /// Announce the watched set
    pub fn start_watching(&mut self) {
        let master = self
            .files
            .iter()
            .find(|f| f.is_master())
            .map(|f| f.path().display().to_string())
            .unwrap_or_default();
        let watching = self
            .files
            .iter()
            .map(|f| f.path().display().to_string())
            .collect();
        self.sink.emit(PreviewEvent::WatchStarted { master, watching });
        if let Err(e) = self.sink.flush() {
            warn!(error = %e, "failed to flush status");
        }
    }

    pub fn shutdown(&mut self) {
        self.state = SurfaceState::Idle;
        self.sink.emit(PreviewEvent::Shutdown);
        if let Err(e) = self.sink.flush() {
            warn!(error = %e, "failed to flush shutdown");
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Path of the artifact on display
    pub fn rendering(&self) -> Option<&Path> {
        self.rendering.as_deref()
    }

    pub fn files(&self) -> &[Rc<WatchedFile>] {
        &self.files
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<V, S> CompileListener for PreviewSurface<V, S>
where
    V: DocumentView + 'static,
    S: PreviewSink + 'static,
{
    fn on_compile_start(&mut self) {
        self.in_flight += 1;
        if self.in_flight > 1 {
            return;
        }
        self.state = SurfaceState::Reloading;
        self.sink.emit(PreviewEvent::CompileStarted);
        self.show_message(RELOADING_MESSAGE);
    }

    fn on_compile_finished(&mut self, error: Option<&str>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight > 0 {
            return;
        }

        if let Err(e) = self.reload_rendering(error) {
            warn!(error = %e, "failed to reload rendering");
            self.state = SurfaceState::ErrorShown;
            self.sink.emit(PreviewEvent::ReloadFailed {
                message: e.to_string(),
            });
            self.show_message(&format!("{}\n{}", RELOAD_ERROR_HEADING, e));
        }
    }
}

#[cfg(test)]
mod tests;
