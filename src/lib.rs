//! texview - live preview for LaTeX documents
//!
//! texview watches a master document and the files it includes, recompiles
//! the master whenever any of them changes, and reloads the rendering (or
//! shows the compiler's error) once the compile finishes.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

// Re-exports for convenience
pub use application::{PreviewSession, PreviewSurface, SessionOptions, SurfaceState, WatchedFile};
pub use config::Config;
pub use domain::{extract_error_message, CompileOutcome, Fingerprint};
pub use error::{PreviewError, PreviewResult};
pub use infrastructure::{FileMonitor, PdfView, ProcessCompiler};
