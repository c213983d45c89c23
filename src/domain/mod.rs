//! Domain Layer
//!
//! Pure types and the ports the rest of texview plugs into.
//!
//! ## Structure
//!
//! - `fingerprint` - content hashes used for change detection
//! - `diagnostics` - error extraction from compiler output
//! - `artifact` - source path to rendered artifact path mapping
//! - `outcome` - the result of one compilation attempt
//! - `ports/` - traits implemented by infrastructure and UI

pub mod artifact;
pub mod diagnostics;
pub mod fingerprint;
pub mod outcome;
pub mod ports;

pub use artifact::rendered_artifact_path;
pub use diagnostics::extract_error_message;
pub use fingerprint::Fingerprint;
pub use outcome::CompileOutcome;
