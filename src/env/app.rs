//! Combined step environment
//!
//! Bundles the collaborators a run writes to, so the pipeline takes one value
//! and tests can swap any part of it.

use super::mock::{MemoryFileStore, RecordingConsole, RecordingEnvSink, RecordingOutputSink};
use super::real::{FileCommandEnv, FileCommandOutput, RealFileStore, WorkflowConsole};
use super::traits::{Console, EnvSink, FileStore, OutputSink};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a run touches besides the artifact backend
///
/// # Examples
///
/// ```
/// use release_env::env::StepEnv;
///
/// // Production: runner command files and stdout in the current directory
/// let env = StepEnv::real(std::env::current_dir().unwrap());
///
/// // Tests: in-memory recording doubles
/// let test_env = StepEnv::mock("/work");
/// ```
#[derive(Clone)]
pub struct StepEnv {
    pub files: Arc<dyn FileStore>,
    pub env: Arc<dyn EnvSink>,
    pub outputs: Arc<dyn OutputSink>,
    pub console: Arc<dyn Console>,
    /// Directory the artifact is downloaded into
    pub workdir: PathBuf,
}

impl StepEnv {
    /// Create an environment bound to the real runner
    pub fn real(workdir: impl Into<PathBuf>) -> Self {
        Self {
            files: Arc::new(RealFileStore::new()),
            env: Arc::new(FileCommandEnv::from_env()),
            outputs: Arc::new(FileCommandOutput::from_env()),
            console: Arc::new(WorkflowConsole::stdout()),
            workdir: workdir.into(),
        }
    }

    /// Create an environment with in-memory implementations
    pub fn mock(workdir: impl Into<PathBuf>) -> Self {
        Self {
            files: Arc::new(MemoryFileStore::new()),
            env: Arc::new(RecordingEnvSink::new()),
            outputs: Arc::new(RecordingOutputSink::new()),
            console: Arc::new(RecordingConsole::new()),
            workdir: workdir.into(),
        }
    }

    /// Create an environment from explicit parts
    pub fn custom(
        files: Arc<dyn FileStore>,
        env: Arc<dyn EnvSink>,
        outputs: Arc<dyn OutputSink>,
        console: Arc<dyn Console>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            files,
            env,
            outputs,
            console,
            workdir: workdir.into(),
        }
    }
}
