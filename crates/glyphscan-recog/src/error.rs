//! Error types for glyphscan-recog

use thiserror::Error;

/// Errors that can occur during segmentation, training and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphscan_core::Error),

    /// Scan rectangle is inverted or lies outside the buffer
    #[error("invalid region: ({x1}, {y1})-({x2}, {y2}) in a {width}x{height} buffer")]
    InvalidRegion {
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No content found in a bitmap
    #[error("no content found: {0}")]
    NoContent(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
