//! PDF document view
//!
//! A lightweight rendering backend: it validates the artifact, counts its
//! pages and keeps the viewing position. Drawing is left to the terminal
//! front end, which only shows the document summary.
//!
//! Pages come from the document's page tree (`lopdf`), which sees through
//! compressed object streams. Files whose structure cannot be parsed fall
//! back to scanning the raw bytes for page objects.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::domain::ports::{DocumentSummary, DocumentView, SizingMode};
use crate::error::{PreviewError, PreviewResult};

const PDF_MAGIC: &[u8] = b"%PDF-";

// Page objects, not the `/Pages` tree nodes
static PAGE_OBJECT: OnceLock<Regex> = OnceLock::new();

#[derive(Debug)]
struct OpenDocument {
    path: PathBuf,
    page_count: usize,
    size_bytes: u64,
}

/// Document view over PDF artifacts on disk
#[derive(Debug, Default)]
pub struct PdfView {
    document: Option<OpenDocument>,
    page: usize,
    sizing: SizingMode,
}

impl PdfView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in the open document, 0 when nothing is open
    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |d| d.page_count)
    }

    pub fn sizing(&self) -> SizingMode {
        self.sizing
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }
}

/// Number of pages in a PDF, never less than one.
pub fn count_pages(bytes: &[u8]) -> usize {
    if bytes.starts_with(PDF_MAGIC) {
        match lopdf::Document::load_mem(bytes) {
            Ok(doc) => {
                let pages = doc.get_pages().len();
                if pages > 0 {
                    return pages;
                }
            }
            Err(e) => debug!(error = %e, "page tree unreadable, scanning for page objects"),
        }
    }
    scan_page_objects(bytes)
}

/// Count uncompressed `/Type /Page` objects in raw bytes
fn scan_page_objects(bytes: &[u8]) -> usize {
    let re = PAGE_OBJECT.get_or_init(|| Regex::new(r"(?-u)/Type\s*/Page\b").expect("valid pattern"));
    re.find_iter(bytes).count().max(1)
}

impl DocumentView for PdfView {
    fn open(&mut self, path: &Path) -> PreviewResult<()> {
        let bytes = fs::read(path).map_err(|source| PreviewError::ArtifactUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        if !bytes.starts_with(PDF_MAGIC) {
            return Err(PreviewError::NotADocument {
                path: path.to_path_buf(),
            });
        }

        self.document = Some(OpenDocument {
            path: path.to_path_buf(),
            page_count: count_pages(&bytes),
            size_bytes: bytes.len() as u64,
        });
        self.page = 0;
        Ok(())
    }

    fn page(&self) -> usize {
        self.page
    }

    fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    fn set_sizing(&mut self, mode: SizingMode) {
        self.sizing = mode;
    }

    fn summary(&self) -> Option<DocumentSummary> {
        self.document.as_ref().map(|d| DocumentSummary {
            path: d.path.clone(),
            page: self.page,
            page_count: d.page_count,
            size_bytes: d.size_bytes,
            sizing: self.sizing,
        })
    }
}
