//! Command-line surface
//!
//! Every step input can be given as a flag or through the variable the
//! runner sets for it (`INPUT_TOKEN`, `INPUT_ARTIFACT_NAME`, `INPUT_EXPORTS`).

pub mod args;

pub use args::Cli;
