//! Error types for texview
//!
//! Uses `thiserror` for library errors. Compile failures are not errors here:
//! they travel through the compile listener channel as plain messages.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for texview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Main error type for texview operations
#[derive(Error, Debug)]
pub enum PreviewError {
    /// A watched source file could not be read
    #[error("cannot read source file {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered artifact does not exist or cannot be read
    #[error("cannot open rendering {path}: {source}")]
    ArtifactUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered artifact exists but the backend does not understand it
    #[error("{path} is not a PDF document")]
    NotADocument { path: PathBuf },

    /// An included file outlived the master it delegates to
    #[error("master document of {path} is no longer available")]
    DetachedInclude { path: PathBuf },

    /// The external compiler could not be started
    #[error("failed to run `{program}`: {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// File system notification backend failure
    #[error("file watch error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
