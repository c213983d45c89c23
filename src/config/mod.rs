//! Configuration module for texview
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (TEXVIEW_*)
//! 3. Project config (`texview.toml` next to the master document)
//! 4. User config (`<config_dir>/texview/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{ColorMode, CompilerConfig, Config, LogConfig, OutputConfig, WatchConfig};
