//! Process Compiler
//!
//! Runs the external TeX engine once per compilation, non-interactively, in
//! the directory of the master document so the rendering lands next to it.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::CompilerConfig;
use crate::domain::ports::{Compiler, CompilerRun};
use crate::error::{PreviewError, PreviewResult};

/// Compiler backed by an external program
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    program: String,
    args: Vec<String>,
}

impl ProcessCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    /// Check that the program can be started at all
    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    fn command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        match (source.parent(), source.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => {
                cmd.arg(name).current_dir(dir);
            }
            _ => {
                cmd.arg(source);
            }
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Compiler for ProcessCompiler {
    fn name(&self) -> &str {
        &self.program
    }

    fn compile(&self, source: &Path) -> PreviewResult<CompilerRun> {
        debug!(program = %self.program, args = ?self.args, source = %source.display(), "spawning compiler");

        let output = self
            .command(source)
            .output()
            .map_err(|source| PreviewError::CompilerSpawn {
                program: self.program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CompilerRun {
            success: output.status.success(),
            status: output.status.code(),
            output: combined,
        })
    }
}
