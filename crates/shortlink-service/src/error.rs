use shortlink_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinkError>;

/// Errors reported by the link service.
///
/// Id collisions never appear here directly: they are retried, and an
/// exhausted retry budget is reported as [`LinkError::CreateFailed`].
/// Cache failures are logged and never reported.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to create unique link, please try again")]
    CreateFailed,
    #[error("storage error: {0}")]
    Store(StorageError),
    #[error("{0} did not complete before the deadline")]
    DeadlineExceeded(&'static str),
    #[error("internal error: {0}")]
    Internal(String),
}

impl LinkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
