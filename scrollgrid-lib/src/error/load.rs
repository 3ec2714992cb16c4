//! Batch load error types

use std::time::Duration;

/// Errors produced while fetching a batch of rows.
///
/// A load error never escapes the mediator: it moves the loader into the
/// error status and is kept for inspection through `last_error()`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The loader reported a failure.
    #[error("Load failed: {0}")]
    Failed(String),

    /// The loader did not resolve within the configured timeout.
    #[error("Load timed out after {0:?}")]
    Timeout(Duration),

    /// The loader's task ended without producing a response.
    #[error("Load task aborted: {0}")]
    Aborted(String),

    /// Underlying error from the data source.
    #[error(transparent)]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

impl LoadError {
    /// Creates a new failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wraps any error from the data source.
    pub fn source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }

    /// Returns `true` if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Aborted(_))
    }
}
