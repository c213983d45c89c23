//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PreviewResult;

use super::loader::{self, ConfigWarning};

/// External compiler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Passed before the source file name
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Extension of the rendered artifact, next to the master file
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            output_extension: default_output_extension(),
        }
    }
}

fn default_program() -> String {
    "pdflatex".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-interaction".to_string(), "nonstopmode".to_string()]
}

fn default_output_extension() -> String {
    "pdf".to_string()
}

/// Watch loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default)]
    pub initial_compile: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            initial_compile: false,
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    50
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Diagnostic log configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Write logs here instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Default filter directive when `TEXVIEW_LOG` is unset
    #[serde(default = "default_max_level")]
    pub max_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            max_level: default_max_level(),
        }
    }
}

fn default_max_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PreviewResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PreviewResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from the project config next to `project_dir`, the user config,
    /// or defaults, then apply environment overrides.
    pub fn load_or_default(
        project_dir: Option<&Path>,
    ) -> PreviewResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_dir)
    }

    /// Apply environment variable overrides (TEXVIEW_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watch.poll_interval_ms.max(1))
    }
}
