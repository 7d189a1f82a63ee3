//! Rotation-specific error types
//!
//! This module defines all errors that can occur while reconciling secrets
//! against the directory.

use thiserror::Error;

/// Errors raised by a [`SecretDirectory`](crate::traits::SecretDirectory)
/// implementation
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory could not be listed (transport or auth failure)
    #[error("Directory unavailable: {reason}")]
    Unavailable { reason: String },

    /// A create, rotate, or delete call against an application failed
    #[error("Directory write failed for application {application_id}: {reason}")]
    WriteFailed {
        application_id: String,
        reason: String,
    },
}

/// Errors that can occur during a reconciliation run
///
/// Directory failures abort the remainder of the run and propagate to the
/// caller untouched; secrets already rotated in the same run are never rolled
/// back. A re-invocation skips them because they are no longer expiring soon.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The directory client signalled a failure
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The caller's cancellation token fired before the next write
    #[error("Rotation cancelled before {operation}")]
    Cancelled { operation: &'static str },
}

/// Result type for rotation operations
pub type RotationResult<T> = Result<T, RotationError>;
