use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoverError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("one of zh-target-pipeline-id and zh-target-pipeline-name is required")]
    MissingPipelineTarget,

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid {0}: contains characters not allowed in an HTTP header")]
    InvalidToken(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to get linked issues: {0}")]
    IssueResolution(#[source] Box<MoverError>),

    #[error("No pipeline name of {0} found")]
    PipelineNotFound(String),

    #[error("No repository id available: pass zh-repo-id or link an issue that carries one")]
    MissingRepositoryId,

    #[error("Failed to move issue #{issue} to pipeline {pipeline_id}: {source}")]
    MoveFailed {
        issue: u64,
        pipeline_id: String,
        #[source]
        source: Box<MoverError>,
    },

    #[error("{failed} of {total} card moves failed")]
    MovesFailed { failed: usize, total: usize },
}

impl MoverError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MoverError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MoverError::ApiError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MoverError>;
