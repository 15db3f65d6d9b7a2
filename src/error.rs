//! Error Taxonomy
//!
//! Every fallible operation in the library returns [`RecommenderError`]. The binary
//! wraps it in `anyhow` at the top level.
//!
//! Recovery depends on the variant:
//! - `Transport` / `Decode` end a single worker session; the coordinator logs them
//!   and keeps serving other workers.
//! - `Config`, `Dataset`, `InvalidInput` and `EmptyDataset` are fatal at startup.
//! - `Computation` is raised on the worker side when the engine task dies.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dataset contains no usable reviews: {0}")]
    EmptyDataset(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Computation failed: {0}")]
    Computation(String),
}

/// Connection-level failures observed during a worker session.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection closed by peer")]
    ConnectionClosed,

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl From<std::io::Error> for RecommenderError {
    fn from(err: std::io::Error) -> Self {
        RecommenderError::Transport(TransportError::Io(err))
    }
}

impl From<serde_json::Error> for RecommenderError {
    fn from(err: serde_json::Error) -> Self {
        RecommenderError::Decode(err.to_string())
    }
}

impl From<serde_yaml::Error> for RecommenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RecommenderError::Config(err.to_string())
    }
}

impl From<csv::Error> for RecommenderError {
    fn from(err: csv::Error) -> Self {
        RecommenderError::Dataset(err.to_string())
    }
}

impl RecommenderError {
    /// True for failures caused by the worker going silent.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RecommenderError::Transport(TransportError::Timeout(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommenderError>;
