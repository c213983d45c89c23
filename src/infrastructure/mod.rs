//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `compiler` - external compiler process
//! - `watch` - file system notifications via `notify`
//! - `pdf` - PDF rendering backend

pub mod compiler;
pub mod pdf;
pub mod watch;

// Re-export for convenience
pub use compiler::ProcessCompiler;
pub use pdf::PdfView;
pub use watch::FileMonitor;
