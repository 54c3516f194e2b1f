//! Real environment implementations that interact with the actual runner
//!
//! These implementations are used in production code and perform actual I/O operations.

use super::command::{issue_command, prepare_key_value_message};
use super::traits::{Console, EnvSink, FileStore, OutputSink};
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Real file system implementation
///
/// Delegates all operations to the standard library's `std::fs` module.
#[derive(Debug, Clone, Default)]
pub struct RealFileStore;

impl RealFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for RealFileStore {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }
}

/// A runner channel backed by a command file, with the legacy stdout
/// command as fallback when the runner did not provide the file.
#[derive(Debug, Clone)]
struct FileCommandChannel {
    file: Option<PathBuf>,
    legacy_command: &'static str,
}

impl FileCommandChannel {
    fn from_env(variable: &str, legacy_command: &'static str) -> Self {
        let file = std::env::var_os(variable)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            file,
            legacy_command,
        }
    }

    fn send(&self, key: &str, value: &str) -> Result<()> {
        match &self.file {
            Some(file) => {
                let message = prepare_key_value_message(key, value)?;
                let mut handle = OpenOptions::new()
                    .append(true)
                    .open(file)
                    .with_context(|| format!("Unable to open command file {}", file.display()))?;
                handle
                    .write_all(message.as_bytes())
                    .with_context(|| format!("Unable to write to command file {}", file.display()))?;
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(
                    stdout,
                    "{}",
                    issue_command(self.legacy_command, &[("name", key)], value)
                )
                .context("Unable to write workflow command to stdout")?;
            }
        }
        Ok(())
    }
}

/// Environment variables for later steps, written to `GITHUB_ENV`
#[derive(Debug, Clone)]
pub struct FileCommandEnv {
    channel: FileCommandChannel,
}

impl FileCommandEnv {
    /// Use the file named by `GITHUB_ENV`, if any
    pub fn from_env() -> Self {
        Self {
            channel: FileCommandChannel::from_env("GITHUB_ENV", "set-env"),
        }
    }

    pub fn with_file(file: Option<PathBuf>) -> Self {
        Self {
            channel: FileCommandChannel {
                file,
                legacy_command: "set-env",
            },
        }
    }
}

impl EnvSink for FileCommandEnv {
    fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        self.channel.send(name, value)
    }
}

/// Step outputs, written to `GITHUB_OUTPUT`
#[derive(Debug, Clone)]
pub struct FileCommandOutput {
    channel: FileCommandChannel,
}

impl FileCommandOutput {
    /// Use the file named by `GITHUB_OUTPUT`, if any
    pub fn from_env() -> Self {
        Self {
            channel: FileCommandChannel::from_env("GITHUB_OUTPUT", "set-output"),
        }
    }

    pub fn with_file(file: Option<PathBuf>) -> Self {
        Self {
            channel: FileCommandChannel {
                file,
                legacy_command: "set-output",
            },
        }
    }
}

impl OutputSink for FileCommandOutput {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.channel.send(name, value)
    }
}

/// Console that prints workflow commands
pub struct WorkflowConsole {
    out: Mutex<Box<dyn Write + Send>>,
}

impl WorkflowConsole {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn emit(&self, command: &str, message: &str) {
        let mut line = issue_command(command, &[], message);
        line.push('\n');
        self.write_block(&line);
    }

    /// Write `block` with a single `write_all`, which holds the stdout lock
    /// for the whole block.
    fn write_block(&self, block: &str) {
        // A poisoned lock or closed stdout leaves nothing to report to.
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(block.as_bytes());
            let _ = out.flush();
        }
    }
}

impl std::fmt::Debug for WorkflowConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowConsole").finish_non_exhaustive()
    }
}

impl Console for WorkflowConsole {
    fn add_mask(&self, secret: &str) {
        self.emit("add-mask", secret);
    }

    fn group(&self, title: &str, lines: &[&str]) {
        let mut block = issue_command("group", &[], title);
        block.push('\n');
        for line in lines {
            block.push_str(&issue_command("debug", &[], line));
            block.push('\n');
        }
        block.push_str(&issue_command("endgroup", &[], ""));
        block.push('\n');
        self.write_block(&block);
    }

    fn warning(&self, message: &str) {
        self.emit("warning", message);
    }

    fn set_failed(&self, message: &str) {
        self.emit("error", message);
    }
}
