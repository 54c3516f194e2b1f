//! In-memory artifact backend for tests

use super::{ArtifactBackend, ArtifactHandle};
use crate::env::FileStore;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One request received by a `MockArtifactBackend`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Find(String),
    Download(ArtifactHandle, PathBuf),
}

#[derive(Debug, Clone)]
struct StoredArtifact {
    id: u64,
    files: Vec<(String, Vec<u8>)>,
}

/// Backend serving preconfigured artifacts
///
/// Downloads write the artifact's files through the given `FileStore`, so the
/// same double works with a real directory or an in-memory store.
#[derive(Clone)]
pub struct MockArtifactBackend {
    files: Arc<dyn FileStore>,
    artifacts: Arc<Mutex<HashMap<String, StoredArtifact>>>,
    lookup_error: Option<String>,
    download_error: Option<String>,
    calls: Arc<Mutex<Vec<BackendCall>>>,
}

impl MockArtifactBackend {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self {
            files,
            artifacts: Arc::new(Mutex::new(HashMap::new())),
            lookup_error: None,
            download_error: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve an artifact containing the given relative files
    pub fn with_artifact<S: Into<String>>(
        self,
        name: impl Into<String>,
        id: u64,
        files: Vec<(S, Vec<u8>)>,
    ) -> Self {
        let files = files
            .into_iter()
            .map(|(path, content)| (path.into(), content))
            .collect();
        self.artifacts
            .lock()
            .unwrap()
            .insert(name.into(), StoredArtifact { id, files });
        self
    }

    /// Make every lookup fail with `message`
    pub fn failing_lookup(mut self, message: impl Into<String>) -> Self {
        self.lookup_error = Some(message.into());
        self
    }

    /// Make every download fail with `message`
    pub fn failing_download(mut self, message: impl Into<String>) -> Self {
        self.download_error = Some(message.into());
        self
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactBackend for MockArtifactBackend {
    async fn find_artifact(&self, name: &str) -> Result<ArtifactHandle> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Find(name.to_string()));
        if let Some(message) = &self.lookup_error {
            bail!("{message}");
        }
        self.artifacts
            .lock()
            .unwrap()
            .get(name)
            .map(|artifact| ArtifactHandle::new(artifact.id))
            .ok_or_else(|| anyhow!("Artifact not found for name: {name}"))
    }

    async fn download_artifact(&self, handle: ArtifactHandle, destination: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(BackendCall::Download(handle, destination.to_path_buf()));
        if let Some(message) = &self.download_error {
            bail!("{message}");
        }
        let artifact = self
            .artifacts
            .lock()
            .unwrap()
            .values()
            .find(|artifact| artifact.id == handle.id())
            .cloned()
            .ok_or_else(|| anyhow!("No artifact with id {}", handle.id()))?;
        for (relative, content) in &artifact.files {
            self.files.write(&destination.join(relative), content)?;
        }
        Ok(())
    }
}
