//! Diagnostic logging setup
//!
//! Logs go to the file named by `[log] file` when set, otherwise to stderr.
//! The terminal preview owns stdout, so stderr logging stays quiet (warnings
//! only) unless raised with `-v` or `TEXVIEW_LOG`.

use std::fs;
use std::io;

use is_terminal::IsTerminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{PreviewError, PreviewResult};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TEXVIEW_LOG";

/// Log files larger than this are truncated on startup
const MAX_LOG_SIZE: u64 = 8 * 1024 * 1024;

/// Pick the filter directive: explicit env wins, then `-v`, then config.
pub fn filter_directive(config: &LogConfig, verbose: u8, env: Option<&str>) -> String {
    if let Some(directive) = env.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }
    match verbose {
        0 if config.file.is_some() => config.max_level.clone(),
        0 => "warn".to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the program so buffered file output is flushed.
pub fn init(config: &LogConfig, verbose: u8) -> PreviewResult<Option<WorkerGuard>> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(config, verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(log_path) = &config.file else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
            .with_target(false)
            .try_init();
        return Ok(None);
    };

    if let Ok(metadata) = fs::metadata(log_path) {
        if metadata.is_file() && metadata.len() > MAX_LOG_SIZE {
            fs::remove_file(log_path)?;
        }
    }

    let invalid = |message: &str| PreviewError::InvalidConfig {
        file: log_path.clone(),
        message: message.to_string(),
    };
    let file_name = log_path
        .file_name()
        .ok_or_else(|| invalid("log file has no file name"))?;
    let directory = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };
    fs::create_dir_all(directory)?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init();

    Ok(Some(guard))
}
