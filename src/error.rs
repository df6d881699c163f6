use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid step composition, detected when a sequencer is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a wizard needs at least one step")]
    EmptySteps,
    #[error("step id `{0}` is used more than once")]
    DuplicateStepId(String),
}

/// Failure reported by a completion handler.
///
/// The sequencer logs these and returns to editing the last step; they never
/// tear the wizard down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("record could not be read as a resume: {0}")]
    InvalidRecord(String),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("completion worker stopped before reporting a result")]
    Disconnected,
    #[error("{0}")]
    Failed(String),
}

impl SubmitError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("backend answered with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend response could not be decoded: {0}")]
    Decode(String),
    #[error("backend reported a failure: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write output to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = WizardError> = std::result::Result<T, E>;
