//! Isolated environment for running the texview binary.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

/// Environment variables that must not leak in from the developer's shell
const SCRUBBED_ENV: &[&str] = &[
    "TEXVIEW_COMPILER",
    "TEXVIEW_OUTPUT_EXTENSION",
    "TEXVIEW_COLOR",
    "TEXVIEW_LOG",
];

/// Temp project directory plus an empty config home
pub struct TestEnv {
    project: TempDir,
    home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project: tempfile::tempdir().unwrap(),
            home: tempfile::tempdir().unwrap(),
        }
    }

    pub fn project(&self) -> &Path {
        self.project.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.project.path().join(name)
    }

    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_texview"));
        cmd.current_dir(self.project())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env("NO_COLOR", "1");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run to completion (for invocations that exit on their own)
    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    /// Start `texview --json ...` and collect its events
    pub fn spawn_json(&self, args: &[&str]) -> PreviewProcess {
        let mut child = self
            .command()
            .arg("--json")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        PreviewProcess {
            child,
            lines: rx,
            seen: Vec::new(),
        }
    }
}

/// A running preview; killed on drop
pub struct PreviewProcess {
    child: Child,
    lines: Receiver<String>,
    seen: Vec<serde_json::Value>,
}

impl PreviewProcess {
    /// Wait for the first not-yet-consumed event with the given tag
    pub fn wait_for(&mut self, event: &str, timeout: Duration) -> Option<serde_json::Value> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let line = self.lines.recv_timeout(remaining).ok()?;
            let Ok(value) = serde_json::from_str::<serde_json::Value>(&line) else {
                continue;
            };
            self.seen.push(value.clone());
            if value["event"] == event {
                return Some(value);
            }
        }
    }

    /// Every event consumed so far
    pub fn seen(&self) -> &[serde_json::Value] {
        &self.seen
    }
}

impl Drop for PreviewProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
