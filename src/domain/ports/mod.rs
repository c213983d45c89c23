//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure and UI layers provide concrete implementations.

pub mod compiler;
pub mod listener;
pub mod preview_events;
pub mod view;

pub use compiler::{Compiler, CompilerRun};
pub use listener::{CompileListener, SharedListener};
pub use preview_events::{NoopSink, PreviewEvent, PreviewSink};
pub use view::{DocumentSummary, DocumentView, SizingMode};
