//! I/O error types
//!
//! Decoder and encoder failures from the `image` crate are mapped into
//! `IoError` variants so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data does not start with a known image signature
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The decoder rejected the image data
    #[error("decode error: {0}")]
    Decode(String),

    /// The encoder failed
    #[error("encode error: {0}")]
    Encode(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] glyphscan_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
