//! # release-env
//!
//! A workflow step that recovers release version information produced by an
//! earlier step and hands it to the steps that follow.
//!
//! ## Usage
//!
//! ```bash
//! INPUT_TOKEN=... INPUT_ARTIFACT_NAME=build-42 INPUT_EXPORTS=true release-env
//! ```
//!
//! ## Modules
//!
//! - `artifact` - Artifact lookup and download, with the REST client and a test double
//! - `cli` - Command-line flags and their runner environment fallbacks
//! - `config` - Validation of step inputs and backend location
//! - `env` - Runner abstractions: working files, exported variables, outputs, console
//! - `error` - The single error type every failure is funneled into
//! - `logging` - Tracing output rendered as workflow commands
//! - `payload` - Decoding of the five-field version record
//! - `pipeline` - The step itself, from inputs to published outputs
pub mod artifact;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod payload;
pub mod pipeline;

pub use error::{ReleaseError, Result};
