//! Environment trait definitions for dependency injection and testing
//!
//! Every side effect of a run goes through one of these traits:
//! - the working directory holding the downloaded artifact file
//! - the runner's environment-variable channel for later steps
//! - the runner's step-output channel
//! - the runner's log console

use anyhow::Result;
use std::path::Path;

/// File system operations on the working directory
///
/// # Examples
///
/// ```
/// use release_env::env::FileStore;
/// use std::path::Path;
///
/// fn read_payload<F: FileStore>(files: &F, path: &Path) -> std::io::Result<Vec<u8>> {
///     files.read(path)
/// }
/// ```
pub trait FileStore: Send + Sync {
    /// Read a file's full contents
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Create or replace a file
    fn write(&self, path: &Path, content: &[u8]) -> std::io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> std::io::Result<()>;
}

/// Variables made visible to subsequent steps of the job
pub trait EnvSink: Send + Sync {
    fn export_variable(&self, name: &str, value: &str) -> Result<()>;
}

/// Named outputs of this step
pub trait OutputSink: Send + Sync {
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
}

/// Runner log console
///
/// Group contents are debug lines, shown by the runner only when step
/// debugging is on.
pub trait Console: Send + Sync {
    /// Register a secret so the runner masks it in all later log lines
    fn add_mask(&self, secret: &str);

    /// Write `lines` as debug output inside a collapsible group.
    ///
    /// The group is written in one piece; no other output can land between
    /// its opening and closing commands.
    fn group(&self, title: &str, lines: &[&str]);

    fn warning(&self, message: &str);

    /// Report the terminal failure of the step
    fn set_failed(&self, message: &str);
}
