//! Step configuration
//!
//! Inputs arrive as loosely-typed strings (`RawInputs`, `RawBackend`) and are
//! validated once into immutable values. `RunConfig` drives the pipeline;
//! `BackendConfig` tells the artifact client where the current workflow run
//! lives.

use crate::error::{ReleaseError, Result};
use std::fmt;
use tracing::debug;
use url::Url;

#[cfg(test)]
mod tests;

/// Input names as documented for the step
pub const INPUT_TOKEN: &str = "token";
pub const INPUT_ARTIFACT_NAME: &str = "artifact_name";
pub const INPUT_EXPORTS: &str = "exports";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Step inputs exactly as received from the invoking environment.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub token: Option<String>,
    pub artifact_name: Option<String>,
    pub exports: Option<String>,
}

/// Sensitive access token. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for the one place that has to send it.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Validated run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    credential: Credential,
    artifact_name: String,
    export: bool,
}

impl RunConfig {
    pub fn new(credential: Credential, artifact_name: impl Into<String>, export: bool) -> Self {
        Self {
            credential,
            artifact_name: artifact_name.into(),
            export,
        }
    }

    /// Validate raw inputs.
    ///
    /// All inputs are trimmed. The token is required. The artifact name
    /// defaults to the empty string. `exports` must be a boolean token;
    /// absent means `false`.
    pub fn resolve(raw: RawInputs) -> Result<Self> {
        let credential = match trimmed(raw.token.as_deref()) {
            "" => return Err(ReleaseError::missing_input(INPUT_TOKEN)),
            token => Credential::new(token),
        };
        debug!("Token: <redacted, {} characters>", credential.len());

        let artifact_name = trimmed(raw.artifact_name.as_deref()).to_string();
        debug!("Artifact name: '{}'", artifact_name);

        let export = parse_boolean_input(INPUT_EXPORTS, raw.exports.as_deref())?;

        Ok(Self {
            credential,
            artifact_name,
            export,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    /// Whether the version fields are exported as environment variables
    pub fn export(&self) -> bool {
        self.export
    }

    /// Name of the file the artifact is expected to contain
    pub fn artifact_file_name(&self) -> String {
        format!("{}.json", self.artifact_name)
    }
}

/// Parse a boolean input.
///
/// Accepts `true` and `false` in any letter case. Surrounding whitespace is
/// ignored and an absent or blank value reads as `false`.
pub fn parse_boolean_input(input: &str, raw: Option<&str>) -> Result<bool> {
    let value = trimmed(raw);
    if value.is_empty() {
        return Ok(false);
    }
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ReleaseError::invalid_boolean(input))
    }
}

/// Input value with surrounding whitespace removed; absent reads as empty
pub fn trimmed(raw: Option<&str>) -> &str {
    raw.map(str::trim).unwrap_or_default()
}

/// Backend location exactly as received from the run context.
#[derive(Debug, Clone, Default)]
pub struct RawBackend {
    pub api_url: Option<String>,
    pub repository: Option<String>,
    pub run_id: Option<String>,
}

/// `owner/name` of the repository the workflow runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn parse(raw: &str) -> Option<Self> {
        let (owner, name) = raw.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Where the artifact backend is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_url: Url,
    pub repository: Repository,
    pub run_id: u64,
}

impl BackendConfig {
    pub fn resolve(raw: RawBackend) -> Result<Self> {
        let api_url = raw
            .api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(api_url.trim()).map_err(|e| {
            ReleaseError::invalid_input("api_url", format!("Invalid API URL '{api_url}'"))
                .with_source(e)
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ReleaseError::invalid_input(
                "api_url",
                format!("Invalid API URL '{api_url}'"),
            ));
        }

        let repository = match raw.repository.as_deref().map(str::trim) {
            None | Some("") => return Err(ReleaseError::missing_input("repository")),
            Some(value) => Repository::parse(value).ok_or_else(|| {
                ReleaseError::invalid_input(
                    "repository",
                    format!("Repository must have the form 'owner/name', got '{value}'"),
                )
            })?,
        };

        let run_id = match raw.run_id.as_deref().map(str::trim) {
            None | Some("") => return Err(ReleaseError::missing_input("run_id")),
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| {
                    ReleaseError::invalid_input(
                        "run_id",
                        format!("Run id must be a positive integer, got '{value}'"),
                    )
                })?,
        };

        debug!("Artifact backend: {} ({} run {})", api_url, repository, run_id);

        Ok(Self {
            api_url,
            repository,
            run_id,
        })
    }
}
