//! Compiler port - one non-interactive run of the external document compiler

use std::path::Path;

use crate::error::PreviewResult;

/// Captured result of a compiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerRun {
    /// Whether the process exited with status zero
    pub success: bool,
    /// Exit code, if the process exited normally
    pub status: Option<i32>,
    /// Combined output (stdout followed by stderr)
    pub output: String,
}

impl CompilerRun {
    /// Human-readable exit status for messages
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {}", code),
            None => "a signal".to_string(),
        }
    }
}

/// Runs the external compiler against a master document.
///
/// Implementations block until the process exits. There is no timeout and no
/// cancellation.
pub trait Compiler {
    /// Program name, used in logs and messages
    fn name(&self) -> &str;

    /// Compile `source` once. An `Err` means the process could not be run
    /// at all; a non-zero exit is reported through `CompilerRun::success`.
    fn compile(&self, source: &Path) -> PreviewResult<CompilerRun>;
}
