use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// Boxed cause carried by the typed variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a run of the step can fail.
///
/// `Configuration`, `ArtifactRetrieval`, `ArtifactFileMissing` and
/// `PayloadDecode` are fatal and end the run. `Cleanup` is only ever logged.
/// Anything raised by a collaborator that is not one of the known kinds
/// ends up in `Unrecognized`.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("{message}")]
    Configuration {
        code: u16,
        message: String,
        input: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Failed to download artifact '{artifact_name}'. Make sure the 'release-startup' action is already run with the same artifact name.")]
    ArtifactRetrieval {
        code: u16,
        artifact_name: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Artifact file '{}' doesn't exist.", path.display())]
    ArtifactFileMissing { code: u16, path: PathBuf },

    #[error("{message}")]
    PayloadDecode {
        code: u16,
        message: String,
        path: PathBuf,
        field: Option<String>,
        #[source]
        source: Option<BoxError>,
    },

    #[error("File '{}' could not be removed.", path.display())]
    Cleanup {
        code: u16,
        path: PathBuf,
        #[source]
        source: Option<BoxError>,
    },

    #[error(transparent)]
    Unrecognized(#[from] anyhow::Error),
}

impl ReleaseError {
    /// A required input was absent or empty
    pub fn missing_input(input: &str) -> Self {
        Self::Configuration {
            code: ErrorCode::CONFIG_MISSING_REQUIRED,
            message: format!("Input required and not supplied: {input}"),
            input: Some(input.to_string()),
            source: None,
        }
    }

    /// An input could not be read as a boolean
    pub fn invalid_boolean(input: &str) -> Self {
        Self::Configuration {
            code: ErrorCode::CONFIG_INVALID_BOOLEAN,
            message: format!(
                "Input does not meet YAML 1.2 \"Core Schema\" specification: {input}\n\
                 Supported boolean inputs: `true` or `false`, in any letter case"
            ),
            input: Some(input.to_string()),
            source: None,
        }
    }

    /// An input was present but unusable
    pub fn invalid_input(input: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            code: ErrorCode::CONFIG_INVALID_VALUE,
            message: message.into(),
            input: Some(input.to_string()),
            source: None,
        }
    }

    /// Lookup or download of the named artifact failed
    pub fn retrieval(artifact_name: impl Into<String>) -> Self {
        Self::ArtifactRetrieval {
            code: ErrorCode::ARTIFACT_RETRIEVAL_FAILED,
            artifact_name: artifact_name.into(),
            source: None,
        }
    }

    /// The backend reported success but the expected file is absent
    pub fn file_missing(path: impl Into<PathBuf>) -> Self {
        Self::ArtifactFileMissing {
            code: ErrorCode::ARTIFACT_FILE_MISSING,
            path: path.into(),
        }
    }

    /// The artifact file could not be decoded into a version record
    pub fn payload(code: u16, path: &Path, message: impl Into<String>) -> Self {
        Self::PayloadDecode {
            code,
            message: message.into(),
            path: path.to_path_buf(),
            field: None,
            source: None,
        }
    }

    /// A required payload field was absent or not a string
    pub fn payload_field(code: u16, path: &Path, field: &str, message: impl Into<String>) -> Self {
        Self::PayloadDecode {
            code,
            message: message.into(),
            path: path.to_path_buf(),
            field: Some(field.to_string()),
            source: None,
        }
    }

    /// The artifact file could not be removed after decoding
    pub fn cleanup(path: impl Into<PathBuf>) -> Self {
        Self::Cleanup {
            code: ErrorCode::CLEANUP_REMOVE_FAILED,
            path: path.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, cause: impl Into<BoxError>) -> Self {
        match &mut self {
            Self::Configuration { source, .. }
            | Self::ArtifactRetrieval { source, .. }
            | Self::PayloadDecode { source, .. }
            | Self::Cleanup { source, .. } => {
                *source = Some(cause.into());
            }
            Self::ArtifactFileMissing { .. } | Self::Unrecognized(_) => {}
        }
        self
    }

    /// Stable numeric code of this error
    pub fn code(&self) -> u16 {
        match self {
            Self::Configuration { code, .. }
            | Self::ArtifactRetrieval { code, .. }
            | Self::ArtifactFileMissing { code, .. }
            | Self::PayloadDecode { code, .. }
            | Self::Cleanup { code, .. } => *code,
            Self::Unrecognized(_) => ErrorCode::UNRECOGNIZED,
        }
    }

    /// Taxonomy name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "ConfigurationError",
            Self::ArtifactRetrieval { .. } => "ArtifactRetrievalError",
            Self::ArtifactFileMissing { .. } => "ArtifactFileMissingError",
            Self::PayloadDecode { .. } => "PayloadDecodeError",
            Self::Cleanup { .. } => "CleanupWarning",
            Self::Unrecognized(_) => "UnrecognizedError",
        }
    }

    /// Whether this error ends the run
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Cleanup { .. })
    }

    /// The single line shown to the operator when the run fails
    pub fn user_message(&self) -> String {
        match self {
            Self::Unrecognized(inner) => format!("Unexpected failure: {inner:#}"),
            known => known.to_string(),
        }
    }

    /// Multi-line detail for the diagnostics group: kind, code, cause chain
    /// and the structured debug rendering.
    pub fn diagnostic_detail(&self) -> String {
        let mut detail = format!(
            "{} [E{:04}] {}\n",
            self.kind(),
            self.code(),
            describe_error_code(self.code())
        );
        let mut cause = std::error::Error::source(self);
        while let Some(inner) = cause {
            detail.push_str(&format!("caused by: {inner}\n"));
            cause = inner.source();
        }
        detail.push_str(&format!("{self:#?}"));
        detail
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
