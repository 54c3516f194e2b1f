//! Environment propagation for later steps

use crate::env::EnvSink;
use crate::error::Result;
use crate::payload::VersionRecord;
use anyhow::Context;
use tracing::debug;

pub const ENV_VERSION: &str = "RELEASE_VERSION";
pub const ENV_PLAIN_VERSION: &str = "RELEASE_PLAIN_VERSION";
pub const ENV_EXTENDED_VERSION: &str = "RELEASE_EXTENDED_VERSION";
pub const ENV_PREVIOUS_VERSION: &str = "RELEASE_PREVIOUS_VERSION";
pub const ENV_REFERENCE: &str = "RELEASE_REFERENCE";

/// Variable name paired with the record field it carries
pub const EXPORTED_VARIABLES: [(&str, fn(&VersionRecord) -> &str); 5] = [
    (ENV_VERSION, |r| r.version.as_str()),
    (ENV_PLAIN_VERSION, |r| r.plain_version.as_str()),
    (ENV_EXTENDED_VERSION, |r| r.extended_version.as_str()),
    (ENV_PREVIOUS_VERSION, |r| r.previous_version.as_str()),
    (ENV_REFERENCE, |r| r.reference.as_str()),
];

/// Write all five fields as environment variables when `enabled`.
///
/// A failed write is not retried and aborts the run.
pub fn export_environment(sink: &dyn EnvSink, record: &VersionRecord, enabled: bool) -> Result<()> {
    if !enabled {
        debug!("Exports disabled, environment left untouched.");
        return Ok(());
    }

    debug!("Attempting to export the environment variables.");
    for (name, field) in EXPORTED_VARIABLES {
        sink.export_variable(name, field(record))
            .with_context(|| format!("Failed to export {name}"))?;
    }
    debug!("Exported the environment variables.");
    Ok(())
}
