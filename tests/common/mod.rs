//! Common test utilities and helpers
#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const TOKEN: &str = "s3cr3t-token";
pub const OWNER: &str = "octo";
pub const REPO: &str = "widgets";
pub const RUN_ID: u64 = 4242;

pub const PAYLOAD: &str = r#"{
  "version": "1.2.3",
  "plainVersion": "1.2.3",
  "extendedVersion": "1.2.3-rc1+build42",
  "previousVersion": "1.2.2",
  "reference": "abc123"
}"#;

/// Build an in-memory zip archive from (path, content) pairs
pub fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[derive(Debug, Clone)]
pub struct FakeArtifact {
    pub id: u64,
    pub name: String,
    pub expired: bool,
    pub archive: Vec<u8>,
}

/// Minimal stand-in for the Actions artifacts REST API
///
/// Archive downloads answer with a redirect to a blob route, the way the
/// real service hands out storage URLs.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    artifacts: Vec<FakeArtifact>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(mut self, id: u64, name: &str, expired: bool, archive: Vec<u8>) -> Self {
        self.artifacts.push(FakeArtifact {
            id,
            name: name.to_string(),
            expired,
            archive,
        });
        self
    }

    /// Request URIs received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port from a background thread, returning the base URL
    pub fn spawn(&self) -> String {
        let api = self.clone();
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, router(api)).await.unwrap();
            });
        });
        format!("http://{}", rx.recv().unwrap())
    }

    fn record(&self, uri: &Uri) {
        self.requests.lock().unwrap().push(uri.to_string());
    }
}

fn router(api: FakeApi) -> Router {
    Router::new()
        .route(
            "/repos/{owner}/{repo}/actions/runs/{run_id}/artifacts",
            get(list_artifacts),
        )
        .route(
            "/repos/{owner}/{repo}/actions/artifacts/{id}/zip",
            get(download_artifact),
        )
        .route("/blob/{id}", get(blob))
        .with_state(api)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

async fn list_artifacts(
    State(api): State<FakeApi>,
    Path((owner, repo, run_id)): Path<(String, String, u64)>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    api.record(&uri);
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Bad credentials"})))
            .into_response();
    }
    if owner != OWNER || repo != REPO || run_id != RUN_ID {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response();
    }

    let artifacts: Vec<_> = api
        .artifacts
        .iter()
        .filter(|artifact| query.get("name").map_or(true, |name| *name == artifact.name))
        .map(|artifact| {
            json!({
                "id": artifact.id,
                "node_id": format!("MDg6QXJ0aWZhY3Q{}", artifact.id),
                "name": artifact.name,
                "size_in_bytes": artifact.archive.len(),
                "expired": artifact.expired,
            })
        })
        .collect();
    Json(json!({"total_count": artifacts.len(), "artifacts": artifacts})).into_response()
}

async fn download_artifact(
    State(api): State<FakeApi>,
    Path((_owner, _repo, id)): Path<(String, String, u64)>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    api.record(&uri);
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !api.artifacts.iter().any(|artifact| artifact.id == id) {
        return StatusCode::NOT_FOUND.into_response();
    }
    (StatusCode::FOUND, [(LOCATION, format!("/blob/{id}"))]).into_response()
}

async fn blob(State(api): State<FakeApi>, Path(id): Path<u64>, uri: Uri) -> Response {
    api.record(&uri);
    match api.artifacts.iter().find(|artifact| artifact.id == id) {
        Some(artifact) => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/zip")],
            artifact.archive.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
