use nt_graph::GraphError;
use nt_poll::PollError;
use nt_query::QueryError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Poll error: {0}")]
    Poll(#[from] PollError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("No node labelled {0:?}")]
    UnknownNode(String),

    #[error("No frames to replay")]
    NoFrames,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
