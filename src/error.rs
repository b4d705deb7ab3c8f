//! Error types for icon-sync

use crate::publish::Stage;
use thiserror::Error;

/// Errors produced while extracting or publishing icons
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing is selected in the design file
    #[error("select at least one frame that contains SVG nodes")]
    EmptySelection,

    /// A selected node cannot hold children
    #[error("selected node '{0}' is not a frame or other container")]
    NotAContainer(String),

    /// The selection has no child that contains a vector shape
    #[error("no SVG nodes found in the selected frames")]
    NoVectorContent,

    /// Repository URL could not be parsed into owner/repo
    #[error("repository URL is invalid: {0}")]
    InvalidRepoUrl(String),

    /// An extracted document is malformed (empty name, missing markup, bad UTF-8)
    #[error("invalid SVG document: {0}")]
    InvalidDocument(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Authentication error
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A remote object or ref does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Branch creation collided with an existing ref
    #[error("reference already exists: {0}")]
    RefAlreadyExists(String),

    /// GitHub rate limit exceeded
    #[error("GitHub rate limit exceeded")]
    RateLimited,

    /// Any other GitHub API failure
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// A pipeline stage failed; wraps the triggering error
    #[error("{stage} failed: {source}")]
    StepFailed {
        /// Stage that was running when the error occurred
        stage: Stage,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// A scene export could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error was detected before any remote call could be made
    pub fn is_precondition(&self) -> bool {
        match self {
            Self::EmptySelection
            | Self::NotAContainer(_)
            | Self::NoVectorContent
            | Self::InvalidRepoUrl(_)
            | Self::InvalidDocument(_)
            | Self::Parse(_)
            | Self::Config(_) => true,
            Self::StepFailed { source, .. } => source.is_precondition(),
            _ => false,
        }
    }

    /// Stage at which the pipeline failed, if this error came from a running pipeline
    pub const fn failed_stage(&self) -> Option<Stage> {
        match self {
            Self::StepFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The innermost error, unwrapping any stage context
    pub fn root(&self) -> &Self {
        match self {
            Self::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                let message = source.message.clone();
                match status {
                    401 => Self::Auth(message),
                    403 if message.to_lowercase().contains("rate limit") => Self::RateLimited,
                    403 => Self::Auth(message),
                    404 => Self::NotFound(message),
                    422 if message.contains("already exists") => Self::RefAlreadyExists(message),
                    429 => Self::RateLimited,
                    _ => Self::GitHubApi(format!("{status} {message}")),
                }
            }
            _ => Self::GitHubApi(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for icon-sync operations
pub type Result<T> = std::result::Result<T, Error>;
