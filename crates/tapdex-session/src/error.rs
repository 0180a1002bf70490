//! Session error types.

use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while building a panel session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("catalog contains no items")]
    EmptyCatalog,

    #[error("duplicate item id in catalog: {0}")]
    DuplicateItem(String),
}
