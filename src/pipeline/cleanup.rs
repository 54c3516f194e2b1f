//! Best-effort removal of the downloaded artifact file
//!
//! Removal runs on the blocking pool and is never joined by the pipeline.
//! Failures are logged and swallowed.

use crate::env::{Console, FileStore};
use crate::error::ReleaseError;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const REMOVAL_ERROR_GROUP: &str = "Artifact removal error";

/// Handle to a detached removal. Dropping it leaves the removal running.
#[derive(Debug)]
pub struct CleanupTask {
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Wait until the removal attempt has finished
    pub async fn settled(self) {
        if let Err(e) = self.handle.await {
            warn!("Artifact removal task did not complete: {}", e);
        }
    }
}

/// Start removing `path` without waiting for it
pub fn spawn_cleanup(
    files: Arc<dyn FileStore>,
    console: Arc<dyn Console>,
    path: PathBuf,
) -> CleanupTask {
    let handle = tokio::task::spawn_blocking(move || {
        if let Err(warning) = remove(files.as_ref(), path) {
            report(console.as_ref(), &warning);
        }
    });
    CleanupTask { handle }
}

/// Remove the file; an already-absent file counts as removed
fn remove(files: &dyn FileStore, path: PathBuf) -> Result<(), ReleaseError> {
    match files.remove_file(&path) {
        Ok(()) => {
            debug!("Removed artifact file '{}'", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReleaseError::cleanup(path).with_source(e)),
    }
}

fn report(console: &dyn Console, warning: &ReleaseError) {
    console.warning(&warning.user_message());
    console.group(REMOVAL_ERROR_GROUP, &[warning.diagnostic_detail().as_str()]);
}
