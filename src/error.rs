//! Unified error type for placeholder image providers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building URLs or saving placeholder images.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Malformed or out-of-domain input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value exceeds a service-specific limit.
    #[error("Out of bounds: {0}")]
    OutOfBounds(String),

    /// The image service answered with a non-success status.
    #[error("Unexpected response from {url} ({status}): {message}")]
    Remote {
        /// The requested URL.
        url: String,
        /// HTTP status code, `0` when unknown (e.g. replayed).
        status: u16,
        /// Short description of the response.
        message: String,
    },

    /// A transport-level failure, passed through unmodified.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Writing the image to disk failed.
    #[error("Can't write file at {}: {source}", .path.display())]
    Io {
        /// The attempted file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse error classes callers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`ImageError::InvalidArgument`] and [`ImageError::Config`].
    InvalidArgument,
    /// See [`ImageError::OutOfBounds`].
    OutOfBounds,
    /// See [`ImageError::Remote`].
    Remote,
    /// See [`ImageError::Io`] and [`ImageError::Network`].
    Io,
}

impl ImageError {
    /// The class this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::Config(_) => ErrorKind::InvalidArgument,
            Self::OutOfBounds(_) => ErrorKind::OutOfBounds,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Network(_) | Self::Io { .. } => ErrorKind::Io,
        }
    }
}
