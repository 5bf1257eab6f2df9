use rusqlite::ErrorCode;
use taskfeed_types::models::TaskStatus;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Failure taxonomy of the engine. Every public operation returns one of
/// these; nothing panics across the operation boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Referenced entity absent (or not a valid target for the action).
    #[error("not found")]
    NotFound,

    /// Actor lacks permission for the action.
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed or missing required input.
    #[error("{0}")]
    Validation(&'static str),

    /// Status change out of a terminal state.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    /// Storage-layer conflict or I/O failure.
    #[error("transaction failed: {0}")]
    Transaction(#[from] rusqlite::Error),
}

impl EngineError {
    /// Busy/locked storage conflicts are the only automatically retryable
    /// failures. Constraint violations are not: under a double-submitted
    /// toggle the loser must surface, not silently re-toggle.
    pub fn is_conflict(&self) -> bool {
        match self {
            EngineError::Transaction(err) => matches!(
                err.sqlite_error_code(),
                Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
            ),
            _ => false,
        }
    }
}
