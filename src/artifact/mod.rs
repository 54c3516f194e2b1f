//! Artifact retrieval
//!
//! An artifact is looked up by name, downloaded into the working directory
//! and then expected to contain `<artifact_name>.json`. Lookup and download
//! count as one operation: either failing yields the same retrieval error.

use crate::config::RunConfig;
use crate::env::FileStore;
use crate::error::{ReleaseError, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod archive;
pub mod github;
mod mock;

pub use github::GithubArtifactClient;
pub use mock::{BackendCall, MockArtifactBackend};

/// Opaque identifier returned by a successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactHandle(u64);

impl ArtifactHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArtifactHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "artifact #{}", self.0)
    }
}

/// Storage service holding the artifacts of the current workflow run
#[async_trait]
pub trait ArtifactBackend: Send + Sync {
    /// Resolve an artifact name to a handle
    async fn find_artifact(&self, name: &str) -> anyhow::Result<ArtifactHandle>;

    /// Download and unpack the artifact's files into `destination`
    async fn download_artifact(
        &self,
        handle: ArtifactHandle,
        destination: &Path,
    ) -> anyhow::Result<()>;
}

/// The downloaded version file. Lives only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedFile {
    path: PathBuf,
}

impl MaterializedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Look up and download the configured artifact, then check that it
/// produced the expected file. Single attempt, no retries.
pub async fn acquire(
    backend: &dyn ArtifactBackend,
    files: &dyn FileStore,
    config: &RunConfig,
    workdir: &Path,
) -> Result<MaterializedFile> {
    let name = config.artifact_name();

    let fetched: anyhow::Result<()> = async {
        let handle = backend.find_artifact(name).await?;
        debug!("Resolved artifact '{}' to {}", name, handle);
        backend.download_artifact(handle, workdir).await
    }
    .await;
    fetched.map_err(|e| ReleaseError::retrieval(name).with_source(e))?;

    let path = workdir.join(config.artifact_file_name());
    if !files.exists(&path) {
        return Err(ReleaseError::file_missing(path));
    }
    debug!("Artifact file name: '{}'", path.display());

    Ok(MaterializedFile { path })
}
