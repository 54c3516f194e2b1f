//! CLI argument structures

use crate::config::{RawBackend, RawInputs};
use clap::Parser;
use std::path::PathBuf;

/// Recover release version information produced earlier in the workflow
#[derive(Parser, Debug)]
#[command(name = "release-env")]
#[command(about = "Recover release version information from a workflow artifact", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Token used to access the artifact backend
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Name of the artifact holding the version file
    #[arg(long, env = "INPUT_ARTIFACT_NAME")]
    pub artifact_name: Option<String>,

    /// Also export the values as environment variables ("true" or "false")
    #[arg(long, env = "INPUT_EXPORTS", value_name = "BOOL")]
    pub exports: Option<String>,

    /// Base URL of the REST API
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Repository the workflow runs in, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    pub repository: Option<String>,

    /// Id of the current workflow run
    #[arg(long, env = "GITHUB_RUN_ID", value_name = "ID")]
    pub run_id: Option<String>,

    /// Directory the artifact is downloaded into (defaults to current directory)
    #[arg(short = 'w', long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,
}

impl Cli {
    /// Step inputs, still unvalidated
    pub fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            token: self.token.clone(),
            artifact_name: self.artifact_name.clone(),
            exports: self.exports.clone(),
        }
    }

    /// Backend location, still unvalidated
    pub fn raw_backend(&self) -> RawBackend {
        RawBackend {
            api_url: self.api_url.clone(),
            repository: self.repository.clone(),
            run_id: self.run_id.clone(),
        }
    }
}
