//! Step outputs

use crate::env::OutputSink;
use crate::error::Result;
use crate::payload::VersionRecord;
use anyhow::Context;

pub const OUTPUT_VERSION: &str = "version";
pub const OUTPUT_PLAIN_VERSION: &str = "plain_version";
pub const OUTPUT_EXTENDED_VERSION: &str = "extended_version";
pub const OUTPUT_PREVIOUS_VERSION: &str = "previous_version";
pub const OUTPUT_REFERENCE: &str = "reference";

pub const PUBLISHED_OUTPUTS: [(&str, fn(&VersionRecord) -> &str); 5] = [
    (OUTPUT_VERSION, |r| r.version.as_str()),
    (OUTPUT_PLAIN_VERSION, |r| r.plain_version.as_str()),
    (OUTPUT_EXTENDED_VERSION, |r| r.extended_version.as_str()),
    (OUTPUT_PREVIOUS_VERSION, |r| r.previous_version.as_str()),
    (OUTPUT_REFERENCE, |r| r.reference.as_str()),
];

/// Publish every field as a step output, values untouched
pub fn publish_outputs(sink: &dyn OutputSink, record: &VersionRecord) -> Result<()> {
    for (name, field) in PUBLISHED_OUTPUTS {
        sink.set_output(name, field(record))
            .with_context(|| format!("Failed to set output {name}"))?;
    }
    Ok(())
}
