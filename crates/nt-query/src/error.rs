//! Error types for query construction and result decoding.

pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("No account selected")]
    MissingAccount,

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Query execution failed: {message}")]
    Execution { message: String },

    #[error("Malformed result payload: {0}")]
    MalformedPayload(String),

    #[error("Malformed result row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    pub fn execution(message: impl Into<String>) -> Self {
        QueryError::Execution {
            message: message.into(),
        }
    }
}
