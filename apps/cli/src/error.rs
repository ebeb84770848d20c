//! # CLI Error Types
//!
//! The error type shown to the user. Wraps the workspace error types and
//! adds argument-level failures.

use thiserror::Error;

use quill_core::{CoreError, ValidationError};
use quill_store::StoreError;

/// Top-level CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Business rule violation from quill-core.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Field validation failure surfaced directly.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Persistence failure from quill-store.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// A command argument that clap can't check (e.g. money amounts,
    /// item specs).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing a rendered document or resolving the data directory failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// No application data directory could be determined for this platform.
    #[error("could not determine an application data directory")]
    NoDataDir,
}

impl CliError {
    /// Shorthand for argument errors.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument(message.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
