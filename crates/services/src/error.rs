//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::{ProblemError, SessionId};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(SessionId),
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures of the submission relay, each mapped to the HTTP status the
/// inbound caller sees.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    #[error("code is required and cannot be empty")]
    MissingCode,
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("webhook transport failed: {0}")]
    Transport(String),
    #[error("webhook request failed: HTTP {status}")]
    RemoteStatus { status: u16, details: String },
    #[error("received an empty response from the webhook")]
    EmptyResponse,
    #[error("could not parse the webhook response: {details}")]
    UnparseableResponse { details: String, raw: String },
}

impl SubmissionError {
    /// Status code relayed to the inbound caller.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingCode => 400,
            Self::RemoteStatus { status, .. } => *status,
            Self::EmptyResponse | Self::UnparseableResponse { .. } => 502,
            Self::MalformedRequest(_) | Self::Transport(_) => 500,
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
