//! Artifact backend on the GitHub Actions REST API
//!
//! Artifacts uploaded earlier in the same workflow run are listed with
//! `GET /repos/{owner}/{repo}/actions/runs/{run_id}/artifacts?name=...` and
//! fetched as a zip from `GET /repos/{owner}/{repo}/actions/artifacts/{id}/zip`.

use super::{archive, ArtifactBackend, ArtifactHandle};
use crate::config::{BackendConfig, Credential};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Artifact client authenticated with the step's token
pub struct GithubArtifactClient {
    http: Client,
    config: BackendConfig,
    token: Credential,
}

impl GithubArtifactClient {
    pub fn new(config: BackendConfig, token: Credential) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("release-env/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL '{}' cannot be a base", self.config.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.http
            .get(url)
            .bearer_auth(self.token.expose())
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

#[async_trait]
impl ArtifactBackend for GithubArtifactClient {
    async fn find_artifact(&self, name: &str) -> Result<ArtifactHandle> {
        let repository = &self.config.repository;
        let run_id = self.config.run_id.to_string();
        let mut url = self.endpoint(&[
            "repos",
            &repository.owner,
            &repository.name,
            "actions",
            "runs",
            &run_id,
            "artifacts",
        ])?;
        url.query_pairs_mut().append_pair("name", name);

        debug!("Listing artifacts: {}", url);
        let list: ArtifactList = self
            .get(url)
            .send()
            .await
            .context("Artifact list request failed")?
            .error_for_status()
            .context("Artifact list request was rejected")?
            .json()
            .await
            .context("Failed to parse artifact list")?;

        select_latest(name, list.artifacts)
    }

    async fn download_artifact(&self, handle: ArtifactHandle, destination: &Path) -> Result<()> {
        let repository = &self.config.repository;
        let artifact_id = handle.id().to_string();
        let url = self.endpoint(&[
            "repos",
            &repository.owner,
            &repository.name,
            "actions",
            "artifacts",
            &artifact_id,
            "zip",
        ])?;

        debug!("Downloading {}: {}", handle, url);
        let bytes = self
            .get(url)
            .send()
            .await
            .context("Artifact download request failed")?
            .error_for_status()
            .context("Artifact download was rejected")?
            .bytes()
            .await
            .context("Artifact download was interrupted")?;

        let destination = destination.to_path_buf();
        let written =
            tokio::task::spawn_blocking(move || archive::extract_zip(&bytes, &destination))
                .await
                .context("Artifact extraction task failed")??;
        debug!("Extracted {} file(s) from {}", written.len(), handle);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ArtifactList {
    artifacts: Vec<ArtifactEntry>,
}

#[derive(Debug, Deserialize)]
struct ArtifactEntry {
    id: u64,
    name: String,
    #[serde(default)]
    expired: bool,
}

/// Pick the most recent live artifact among those the backend matched
fn select_latest(name: &str, artifacts: Vec<ArtifactEntry>) -> Result<ArtifactHandle> {
    let live: Vec<ArtifactEntry> = artifacts.into_iter().filter(|a| !a.expired).collect();
    if live.len() > 1 {
        debug!(
            "Found {} artifacts matching '{}', using the most recent",
            live.len(),
            name
        );
    }
    live.iter()
        .max_by_key(|artifact| artifact.id)
        .map(|artifact| {
            debug!("Selected artifact '{}' (id {})", artifact.name, artifact.id);
            ArtifactHandle::new(artifact.id)
        })
        .ok_or_else(|| anyhow!("Artifact not found for name: {name}"))
}
