use thiserror::Error;

use crate::task_id::TaskId;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// The id is not in the last-fetched list.
    #[error("task {0} is not in the current list")]
    NotFound(TaskId),
    /// The request never completed, or its body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}
