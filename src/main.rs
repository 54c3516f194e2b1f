use clap::Parser;
use release_env::artifact::{ArtifactBackend, GithubArtifactClient};
use release_env::cli::Cli;
use release_env::config::BackendConfig;
use release_env::env::StepEnv;
use release_env::{logging, pipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    debug!("release-env started with verbosity level: {}", cli.verbose);

    let workdir = cli
        .workdir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let env = StepEnv::real(workdir);

    let raw_backend = cli.raw_backend();
    let outcome = pipeline::run(&env, cli.raw_inputs(), |config| {
        let backend = BackendConfig::resolve(raw_backend)?;
        let client = GithubArtifactClient::new(backend, config.credential().clone())?;
        Ok(Arc::new(client) as Arc<dyn ArtifactBackend>)
    })
    .await;

    // A pending artifact removal is not awaited; runtime shutdown lets it finish.
    pipeline::conclude(env.console.as_ref(), outcome).into()
}
