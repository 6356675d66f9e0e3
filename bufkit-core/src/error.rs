//! Error types for bufkit operations.
//!
//! One error enum covers the whole workspace. Conditions that a trusted
//! caller can avoid entirely (unbalanced scopes, retired stores, invalid
//! code points) are reported as typed errors rather than aborting, so the
//! crates stay usable from test harnesses and fallible call sites.

use thiserror::Error;

/// The main error type for bufkit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A fixed-capacity sink cannot hold the requested amount of data.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// The compressing store was already merged; its stream is closed.
    #[error("Store already finished: the compression stream was flushed and cannot accept more data")]
    StoreFinished,

    /// The streaming compressor reported a failure.
    #[error("Compression error: {message}")]
    Compress {
        /// Description from the underlying compressor.
        message: String,
    },

    /// A document scope was closed that was never opened, or a document
    /// finished with scopes still open.
    #[error("Unbalanced scope: depth {depth} at document boundary")]
    UnbalancedScope {
        /// Nesting depth at the point of the violation.
        depth: usize,
    },

    /// Wide text contained a value outside the Unicode scalar range.
    #[error("Invalid code point: {value:#x}")]
    InvalidCodePoint {
        /// The offending code unit/point.
        value: u32,
    },
}

/// Result type alias for bufkit operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create a compression error.
    pub fn compress(message: impl Into<String>) -> Self {
        Self::Compress {
            message: message.into(),
        }
    }

    /// Create an unbalanced scope error.
    pub fn unbalanced_scope(depth: usize) -> Self {
        Self::UnbalancedScope { depth }
    }

    /// Create an invalid code point error.
    pub fn invalid_code_point(value: u32) -> Self {
        Self::InvalidCodePoint { value }
    }
}
