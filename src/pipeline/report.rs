//! Turning the run result into the step's exit status

use super::RunSummary;
use crate::env::Console;
use crate::error::ReleaseError;
use std::process::ExitCode;
use tracing::info;

pub const ERROR_GROUP: &str = "Error";

/// Final status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Succeeded,
    Failed,
}

impl From<Conclusion> for ExitCode {
    fn from(conclusion: Conclusion) -> Self {
        match conclusion {
            Conclusion::Succeeded => ExitCode::SUCCESS,
            Conclusion::Failed => ExitCode::FAILURE,
        }
    }
}

/// Emit the failure detail inside a collapsed group, then the one-line failure
pub fn report_failure(console: &dyn Console, error: &ReleaseError) {
    console.group(ERROR_GROUP, &[error.diagnostic_detail().as_str()]);
    console.set_failed(&error.user_message());
}

/// Conclude a run. Any cleanup still in flight is left detached.
pub fn conclude(
    console: &dyn Console,
    outcome: Result<RunSummary, ReleaseError>,
) -> Conclusion {
    match outcome {
        Ok(summary) => {
            info!("Release version {} is ready.", summary.record.version);
            Conclusion::Succeeded
        }
        Err(error) => {
            report_failure(console, &error);
            Conclusion::Failed
        }
    }
}
