//! Error types for antar.
//!
//! This module defines the error types returned by extraction operations.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every extraction attempt came back without text.
    #[error("No extractable content found")]
    NoContent,

    /// The extraction options are out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
