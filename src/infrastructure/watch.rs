//! File system watcher for change notifications.
//!
//! Watches the parent directory of every source file so saves that replace
//! the file (write to temp, rename over) are still seen, then filters events
//! down to the files actually registered.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use notify::{
    event::{AccessKind, AccessMode, ModifyKind},
    Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use tracing::{debug, warn};

use crate::application::ChangeSource;
use crate::error::PreviewResult;

/// Delivers change notifications for a set of files
pub struct FileMonitor {
    watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    files: HashSet<PathBuf>,
    directories: HashSet<PathBuf>,
}

impl FileMonitor {
    /// Create a new file monitor.
    pub fn new() -> PreviewResult<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(tx, Config::default())?;

        Ok(Self {
            watcher,
            receiver: rx,
            files: HashSet::new(),
            directories: HashSet::new(),
        })
    }

    /// Paths currently registered
    pub fn watched(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    fn collect(&self, event: Event, changed: &mut Vec<PathBuf>) {
        if !is_relevant_kind(&event.kind) {
            return;
        }
        for path in event.paths {
            if self.files.contains(&path) && !changed.contains(&path) {
                changed.push(path);
            }
        }
    }
}

impl ChangeSource for FileMonitor {
    /// Start watching a file. The path should be absolute.
    fn watch(&mut self, path: &Path) -> PreviewResult<()> {
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if self.directories.insert(directory.clone()) {
            // Non-recursive: only direct children of the directory
            self.watcher.watch(&directory, RecursiveMode::NonRecursive)?;
            debug!(directory = %directory.display(), "watching directory");
        }
        self.files.insert(path.to_path_buf());
        Ok(())
    }

    /// Block for the first event (up to `timeout`), then drain everything
    /// pending. Each changed file is reported once per poll.
    fn poll(&mut self, timeout: Duration) -> Vec<PathBuf> {
        let mut changed = Vec::new();

        match self.receiver.recv_timeout(timeout) {
            Ok(Ok(event)) => self.collect(event, &mut changed),
            Ok(Err(e)) => warn!(error = %e, "watch error"),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return changed
            }
        }

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => self.collect(event, &mut changed),
                Ok(Err(e)) => warn!(error = %e, "watch error"),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        changed
    }
}

/// Modifications, writes and (re)creations trigger a re-check
fn is_relevant_kind(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Any)
            | EventKind::Modify(ModifyKind::Name(_))
            | EventKind::Access(AccessKind::Close(AccessMode::Write))
            | EventKind::Create(_)
    )
}
