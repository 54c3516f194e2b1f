//! Environment abstraction layer for dependency injection and testing
//!
//! The runner is only ever reached through the traits in this module:
//! - **FileStore**: the working directory holding the downloaded artifact
//! - **EnvSink**: variables inherited by later steps (`GITHUB_ENV`)
//! - **OutputSink**: step outputs (`GITHUB_OUTPUT`)
//! - **Console**: workflow commands on stdout (groups, masks, warnings, failure)
//!
//! Real implementations talk to the runner; recording implementations keep
//! everything in memory for tests. `StepEnv` bundles one of each.
//!
//! # Testing
//!
//! ```
//! use release_env::env::{RecordingOutputSink, StepEnv, OutputSink};
//! use std::sync::Arc;
//!
//! let outputs = RecordingOutputSink::new();
//! let base = StepEnv::mock("/work");
//! let env = StepEnv::custom(
//!     base.files.clone(),
//!     base.env.clone(),
//!     Arc::new(outputs.clone()),
//!     base.console.clone(),
//!     "/work",
//! );
//!
//! env.outputs.set_output("version", "1.2.3").unwrap();
//! assert_eq!(outputs.get("version").as_deref(), Some("1.2.3"));
//! ```

mod app;
pub mod command;
mod mock;
mod real;
mod traits;

pub use app::StepEnv;
pub use mock::{
    ConsoleEvent, MemoryFileStore, RecordingConsole, RecordingEnvSink, RecordingOutputSink,
};
pub use real::{FileCommandEnv, FileCommandOutput, RealFileStore, WorkflowConsole};
pub use traits::{Console, EnvSink, FileStore, OutputSink};
