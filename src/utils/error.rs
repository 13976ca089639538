//! Error types for the compressor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use serde::Serialize;
use thiserror::Error;

/// Main error type for the application.
///
/// All errors are converted to this type before being returned to the
/// frontend, where they surface as non-fatal notifications.
#[derive(Error, Debug, Serialize)]
pub enum ShrinkError {
    /// A request precondition was violated
    #[error("Validation error: {0}")]
    Validation(String),

    /// The encoder ran but its best effort stayed above the requested bound
    #[error("Could not compress to the requested size. Try a higher value.")]
    TargetNotReached,

    /// The encoder itself failed (undecodable input, encode failure)
    #[error("Compression error: {0}")]
    Compression(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for compressor operations.
pub type ShrinkResult<T> = Result<T, ShrinkError>;

// Helper methods for error creation
impl ShrinkError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn compression<T: Into<String>>(msg: T) -> Self {
        Self::Compression(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }
}

// Convert std::io::Error to ShrinkError
impl From<io::Error> for ShrinkError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Convert image decode/encode errors at the primitive boundary
impl From<image::ImageError> for ShrinkError {
    fn from(err: image::ImageError) -> Self {
        Self::Compression(err.to_string())
    }
}
