//! Application Layer
//!
//! Orchestrates the watch, compile and reload flow.
//! This layer:
//! - Depends on the Domain layer (value types, ports)
//! - Coordinates between Infrastructure, UI and Domain
//!
//! ## Components
//!
//! - `WatchedFile` - one source file, its fingerprint and compile listeners
//! - `PreviewSurface` - displays the latest rendering and compile errors
//! - `PreviewSession` - builds the watched set and runs the watch loop

pub mod preview;
pub mod session;
pub mod watched_file;

pub use preview::{PreviewSurface, SurfaceState};
pub use session::{ChangeSource, PreviewSession, SessionOptions};
pub use watched_file::{Role, WatchedFile};
