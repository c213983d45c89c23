//! Watched File
//!
//! Tracks one source file's content fingerprint and drives compilation of the
//! master document whenever the content really changes.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use crate::domain::ports::{Compiler, SharedListener};
use crate::domain::{extract_error_message, CompileOutcome, Fingerprint};
use crate::error::{PreviewError, PreviewResult};

/// Role of a watched file in the document
pub enum Role {
    /// Top-level document, compiled directly
    Master { compiler: Rc<dyn Compiler> },
    /// File included by a master; compiling it compiles the master.
    /// Non-owning: the session owns every watched file.
    Included(Weak<WatchedFile>),
}

/// One source file under observation
pub struct WatchedFile {
    path: PathBuf,
    role: Role,
    fingerprint: Cell<Fingerprint>,
    compiling: Cell<bool>,
    /// Set when a change arrives while a compile is in flight
    dirty: Cell<bool>,
    listeners: RefCell<Vec<SharedListener>>,
}

impl WatchedFile {
    /// Create the master document entry.
    ///
    /// Reads the whole file to compute the initial fingerprint. Fails if the
    /// path does not exist or cannot be read.
    pub fn master(path: &Path, compiler: Rc<dyn Compiler>) -> PreviewResult<Rc<Self>> {
        Self::create(path, Role::Master { compiler })
    }

    /// Create an included file that delegates compilation to `master`.
    pub fn included(path: &Path, master: &Rc<WatchedFile>) -> PreviewResult<Rc<Self>> {
        Self::create(path, Role::Included(Rc::downgrade(master)))
    }

    fn create(path: &Path, role: Role) -> PreviewResult<Rc<Self>> {
        let path = path
            .canonicalize()
            .map_err(|source| PreviewError::SourceUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let fingerprint = Fingerprint::of_file(&path)?;
        debug!(path = %path.display(), %fingerprint, "watching source file");

        Ok(Rc::new(Self {
            path,
            role,
            fingerprint: Cell::new(fingerprint),
            compiling: Cell::new(false),
            dirty: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Absolute path of this file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fingerprint of the last content read
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint.get()
    }

    pub fn is_compiling(&self) -> bool {
        self.compiling.get()
    }

    /// True iff this file is the top-level document
    pub fn is_master(&self) -> bool {
        matches!(self.role, Role::Master { .. })
    }

    /// The master document: this file itself, or the one it delegates to
    pub fn get_master(self: &Rc<Self>) -> PreviewResult<Rc<WatchedFile>> {
        match &self.role {
            Role::Master { .. } => Ok(Rc::clone(self)),
            Role::Included(master) => master
                .upgrade()
                .ok_or_else(|| PreviewError::DetachedInclude {
                    path: self.path.clone(),
                }),
        }
    }

    /// Register a listener for this file's compile start/finish notifications
    pub fn subscribe(&self, listener: SharedListener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Handle a change notification for this file.
    ///
    /// Re-reads the content; compiles only if the fingerprint changed.
    /// A notification arriving while this file is compiling is coalesced into
    /// one re-check after the running compile completes. Returns whether a
    /// compile ran.
    pub fn on_change_notification(&self) -> PreviewResult<bool> {
        if self.compiling.get() {
            debug!(path = %self.path.display(), "change during compile, deferring");
            self.dirty.set(true);
            return Ok(false);
        }

        let mut compiled = false;
        loop {
            self.dirty.set(false);

            let current = Fingerprint::of_file(&self.path)?;
            if current == self.fingerprint.get() {
                debug!(path = %self.path.display(), "content unchanged");
                break;
            }
            self.fingerprint.set(current);
            info!(path = %self.path.display(), "content changed");

            self.compiling.set(true);
            self.compile();
            self.compiling.set(false);
            compiled = true;

            if !self.dirty.get() {
                break;
            }
        }
        Ok(compiled)
    }

    /// Compile the document this file belongs to.
    ///
    /// Fires this file's start listeners, compiles (directly when master,
    /// through the master otherwise), then fires this file's finish listeners
    /// with the outcome.
    pub fn compile(&self) -> CompileOutcome {
        self.notify_start();

        let outcome = match &self.role {
            Role::Master { compiler } => self.run_compiler(compiler.as_ref()),
            Role::Included(master) => match master.upgrade() {
                Some(master) => master.compile(),
                None => CompileOutcome::Failed(
                    PreviewError::DetachedInclude {
                        path: self.path.clone(),
                    }
                    .to_string(),
                ),
            },
        };

        self.notify_finished(&outcome);
        outcome
    }

    fn run_compiler(&self, compiler: &dyn Compiler) -> CompileOutcome {
        info!(path = %self.path.display(), compiler = compiler.name(), "compiling");

        let run = match compiler.compile(&self.path) {
            Ok(run) => run,
            Err(e) => {
                warn!(error = %e, "compiler could not be run");
                return CompileOutcome::Failed(e.to_string());
            }
        };

        if run.success {
            info!(path = %self.path.display(), "compilation succeeded");
            return CompileOutcome::Succeeded;
        }

        let mut message = extract_error_message(&run.output);
        if message.is_empty() {
            message = format!(
                "{} failed with {} and reported no diagnostics",
                compiler.name(),
                run.status_label()
            );
        }
        warn!(path = %self.path.display(), status = ?run.status, "compilation failed");
        CompileOutcome::Failed(message)
    }

    fn notify_start(&self) {
        // Snapshot so listeners may subscribe while being notified
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener.borrow_mut().on_compile_start();
        }
    }

    fn notify_finished(&self, outcome: &CompileOutcome) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener
                .borrow_mut()
                .on_compile_finished(outcome.error_message());
        }
    }
}
