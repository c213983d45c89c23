//! Document view port - the rendering backend behind the preview surface

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PreviewResult;

/// How the rendered document is sized in its display area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Whole page fits the window
    #[default]
    BestFit,
    FitWidth,
    Free,
}

impl SizingMode {
    pub fn label(&self) -> &'static str {
        match self {
            SizingMode::BestFit => "fit to window",
            SizingMode::FitWidth => "fit width",
            SizingMode::Free => "free",
        }
    }
}

/// Snapshot of what the view currently displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub path: PathBuf,
    /// Zero-based page index
    pub page: usize,
    pub page_count: usize,
    pub size_bytes: u64,
    pub sizing: SizingMode,
}

/// Rendering backend capabilities used by the preview surface
pub trait DocumentView {
    /// Open the artifact at `path`, replacing whatever was shown.
    /// Fails if the artifact is missing or cannot be opened.
    fn open(&mut self, path: &Path) -> PreviewResult<()>;

    /// Current zero-based page index
    fn page(&self) -> usize;

    fn set_page(&mut self, page: usize);

    fn set_sizing(&mut self, mode: SizingMode);

    /// `None` when nothing is open
    fn summary(&self) -> Option<DocumentSummary>;
}
