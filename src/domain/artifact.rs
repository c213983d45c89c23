//! Rendered artifact paths

use std::path::{Path, PathBuf};

/// Derive the rendered artifact path for a source file.
///
/// `chapter.tex` with extension `pdf` becomes `chapter.pdf` in the same
/// directory. A source without an extension gets one appended.
pub fn rendered_artifact_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension.trim_start_matches('.'))
}
