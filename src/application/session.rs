//! Preview session
//!
//! Builds the watched set from the command line, wires it to the preview
//! surface and runs the single-threaded watch loop. Compiles run on this
//! thread and block the loop until the compiler exits.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::ports::{Compiler, DocumentView, PreviewSink};
use crate::error::PreviewResult;

use super::preview::PreviewSurface;
use super::watched_file::WatchedFile;

/// Source of file change notifications
pub trait ChangeSource {
    /// Begin observing `path`
    fn watch(&mut self, path: &Path) -> PreviewResult<()>;

    /// Wait up to `timeout` and return the distinct paths that changed
    fn poll(&mut self, timeout: Duration) -> Vec<PathBuf>;
}

/// Session options
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Top-level document
    pub master: PathBuf,
    /// Additional files whose master is `master`
    pub included: Vec<PathBuf>,
    /// Compile once before loading the rendering
    pub initial_compile: bool,
    /// How long one poll of the change source may block
    pub poll_interval: Duration,
}

impl SessionOptions {
    pub fn new(master: PathBuf) -> Self {
        Self {
            master,
            included: Vec::new(),
            initial_compile: false,
            poll_interval: Duration::from_millis(50),
        }
    }

    pub fn with_included(mut self, included: Vec<PathBuf>) -> Self {
        self.included = included;
        self
    }

    pub fn with_initial_compile(mut self, initial_compile: bool) -> Self {
        self.initial_compile = initial_compile;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

pub struct PreviewSession<V, S> {
    surface: Rc<RefCell<PreviewSurface<V, S>>>,
    files: Vec<Rc<WatchedFile>>,
    poll_interval: Duration,
}

impl<V, S> PreviewSession<V, S>
where
    V: DocumentView + 'static,
    S: PreviewSink + 'static,
{
    /// Create every watched file, register it with the change source and the
    /// surface. Fails if any source is unreadable or the initial rendering
    /// cannot be opened.
    pub fn start(
        options: &SessionOptions,
        compiler: Rc<dyn Compiler>,
        surface: PreviewSurface<V, S>,
        source: &mut impl ChangeSource,
    ) -> PreviewResult<Self> {
        let surface = surface.into_shared();

        let master = WatchedFile::master(&options.master, compiler)?;
        let mut files = vec![master.clone()];
        for path in &options.included {
            files.push(WatchedFile::included(path, &master)?);
        }

        for file in &files {
            source.watch(file.path())?;
        }

        if options.initial_compile {
            // Not yet subscribed: the surface has nothing loaded to reload
            let outcome = master.compile();
            if let Some(error) = outcome.error_message() {
                warn!(%error, "initial compilation failed");
            }
        }

        for file in &files {
            PreviewSurface::add_watched_file(&surface, file.clone())?;
        }
        surface.borrow_mut().start_watching();
        info!(
            master = %master.path().display(),
            files = files.len(),
            "preview session started"
        );

        Ok(Self {
            surface,
            files,
            poll_interval: options.poll_interval,
        })
    }

    /// Dispatch one change notification to the watched file at `path`.
    /// Returns whether a compile ran.
    pub fn notify_change(&self, path: &Path) -> bool {
        let Some(file) = self.find(path) else {
            debug!(path = %path.display(), "change for unwatched path");
            return false;
        };

        match file.on_change_notification() {
            Ok(compiled) => compiled,
            Err(e) => {
                // Editors may briefly remove the file while saving
                warn!(path = %path.display(), error = %e, "cannot re-read changed file");
                false
            }
        }
    }

    /// Run the watch loop until `running` clears.
    pub fn run(&self, source: &mut impl ChangeSource, running: Arc<AtomicBool>) {
        while running.load(Ordering::SeqCst) {
            for path in source.poll(self.poll_interval) {
                self.notify_change(&path);
            }
        }
        self.surface.borrow_mut().shutdown();
    }

    pub fn files(&self) -> &[Rc<WatchedFile>] {
        &self.files
    }

    pub fn surface(&self) -> &Rc<RefCell<PreviewSurface<V, S>>> {
        &self.surface
    }

    fn find(&self, path: &Path) -> Option<&Rc<WatchedFile>> {
        self.files.iter().find(|f| f.path() == path).or_else(|| {
            let canonical = path.canonicalize().ok()?;
            self.files.iter().find(|f| f.path() == canonical)
        })
    }
}
