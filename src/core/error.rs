//! Error types for depot operations.

use thiserror::Error;

/// Errors produced by depot components.
///
/// Cancellation is not an error; it is reported through
/// [`crate::core::WorkerExit`].
#[derive(Debug, Error)]
pub enum DepotError {
    /// Configuration rejected before any concurrent work started.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A push was attempted after the buffer was closed.
    #[error("buffer closed")]
    BufferClosed,
    /// A spawned producer or monitor task failed to join.
    #[error("task failed: {0}")]
    Task(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
