//! Error types for the polling layer.

use std::path::PathBuf;

use nt_query::QueryError;

/// Errors surfaced to whoever drives the accumulator.
///
/// Individual poll failures are not in here: they are logged and the
/// session keeps its last graph.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Invalid parameters: {0}")]
    Params(#[from] QueryError),

    #[error("Config error: {what}")]
    Config { what: String },

    #[error("Failed to load rows from {path}")]
    Rows { path: PathBuf, source: QueryError },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for nt-poll operations.
pub type PollResult<T> = Result<T, PollError>;
