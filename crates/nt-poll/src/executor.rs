//! The query-execution collaborator.

use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use nt_graph::Row;
use nt_query::{decode_rows_str, AccountId, QueryResult};

use crate::error::{PollError, PollResult};

/// Runs a query string against an account and returns its grouped rows.
///
/// Implementations may fail or return no rows; neither ends the session.
pub trait QueryExecutor: Send + Sync + 'static {
    fn execute(
        &self,
        account_id: AccountId,
        query: &str,
    ) -> impl Future<Output = QueryResult<Vec<Row>>> + Send;
}

/// Serves pre-recorded result frames in turn, wrapping around at the end.
#[derive(Debug, Default)]
pub struct ReplayExecutor {
    frames: Vec<Vec<Row>>,
    cursor: AtomicUsize,
}

impl ReplayExecutor {
    pub fn new(frames: Vec<Vec<Row>>) -> Self {
        Self {
            frames,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Load each file as one frame of JSON result rows.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> PollResult<Self> {
        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)?;
            let rows = decode_rows_str(&content).map_err(|source| PollError::Rows {
                path: path.to_path_buf(),
                source,
            })?;
            frames.push(rows);
        }
        Ok(Self::new(frames))
    }

    /// Number of executions served so far.
    pub fn served(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }
}

impl QueryExecutor for ReplayExecutor {
    async fn execute(&self, account_id: AccountId, query: &str) -> QueryResult<Vec<Row>> {
        let turn = self.cursor.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(%account_id, query, turn, "replaying recorded frame");
        if self.frames.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.frames[turn % self.frames.len()].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replay_wraps_around() {
        let exec = ReplayExecutor::new(vec![
            vec![Row::new(["A", "B"], 1.0)],
            Vec::new(),
        ]);
        let account = AccountId(1);

        assert_eq!(exec.execute(account, "q").await.unwrap().len(), 1);
        assert!(exec.execute(account, "q").await.unwrap().is_empty());
        assert_eq!(exec.execute(account, "q").await.unwrap().len(), 1);
        assert_eq!(exec.served(), 3);
    }

    #[tokio::test]
    async fn no_frames_means_empty_results() {
        let exec = ReplayExecutor::default();
        assert!(exec.execute(AccountId(1), "q").await.unwrap().is_empty());
    }
}
