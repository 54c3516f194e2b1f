//! The step pipeline
//!
//! `Init -> ConfigResolved -> ArtifactAcquired -> PayloadDecoded ->
//! (EnvExported | EnvSkipped) -> OutputsPublished -> Done`
//!
//! Every stage completes before the next one starts. Removal of the artifact
//! file branches off after decoding and is never waited for. The first
//! failing stage ends the run; nothing after it executes.

use crate::artifact::{self, ArtifactBackend};
use crate::config::{trimmed, RawInputs, RunConfig};
use crate::env::StepEnv;
use crate::error::{ErrorCode, ReleaseError, Result};
use crate::payload::VersionRecord;
use std::sync::Arc;
use tracing::{debug, info, trace};

pub mod cleanup;
pub mod export;
pub mod outputs;
pub mod report;

pub use cleanup::CleanupTask;
pub use report::{conclude, Conclusion};

/// Progress of a run through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ConfigResolved,
    ArtifactAcquired,
    PayloadDecoded,
    EnvExported,
    EnvSkipped,
    OutputsPublished,
    Done,
}

/// What a successful run produced
#[derive(Debug)]
pub struct RunSummary {
    pub record: VersionRecord,
    /// Removal of the artifact file, possibly still running
    pub cleanup: CleanupTask,
}

fn enter(stage: Stage) {
    trace!("Stage: {:?}", stage);
}

/// Run the step once.
///
/// `connect` builds the artifact backend from the resolved configuration;
/// it is called after the inputs are validated and before any lookup.
pub async fn run<C>(env: &StepEnv, inputs: RawInputs, connect: C) -> Result<RunSummary>
where
    C: FnOnce(&RunConfig) -> Result<Arc<dyn ArtifactBackend>>,
{
    enter(Stage::Init);
    // Masked before validation so no later line can leak it.
    let token = trimmed(inputs.token.as_deref());
    if !token.is_empty() {
        env.console.add_mask(token);
    }
    let config = RunConfig::resolve(inputs)?;
    info!("Exports is: {}", config.export());
    enter(Stage::ConfigResolved);

    let backend = connect(&config)?;
    let file =
        artifact::acquire(backend.as_ref(), env.files.as_ref(), &config, &env.workdir).await?;
    enter(Stage::ArtifactAcquired);

    let bytes = env.files.read(file.path()).map_err(|e| {
        ReleaseError::payload(
            ErrorCode::PAYLOAD_UNREADABLE,
            file.path(),
            format!("Unable to read artifact file '{}'", file.path().display()),
        )
        .with_source(e)
    })?;
    let record = VersionRecord::decode(&bytes, file.path())?;
    debug!("Version is: {}", record.version);
    debug!("Plain version is: {}", record.plain_version);
    debug!("Extended version is: {}", record.extended_version);
    debug!("Previous version is: {}", record.previous_version);
    debug!("Reference is: {}", record.reference);
    enter(Stage::PayloadDecoded);

    let cleanup = cleanup::spawn_cleanup(env.files.clone(), env.console.clone(), file.into_path());

    export::export_environment(env.env.as_ref(), &record, config.export())?;
    enter(if config.export() {
        Stage::EnvExported
    } else {
        Stage::EnvSkipped
    });

    outputs::publish_outputs(env.outputs.as_ref(), &record)?;
    enter(Stage::OutputsPublished);

    enter(Stage::Done);
    Ok(RunSummary { record, cleanup })
}
