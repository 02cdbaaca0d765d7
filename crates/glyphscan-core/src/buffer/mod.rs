//! PixelBuffer - The scan-time image container
//!
//! A `PixelBuffer` owns a `width x height` array of samples in row-major
//! order. It goes through two states during a scan:
//!
//! - **Packed color**: each sample is `0xRRGGBBAA` (see [`crate::color`])
//! - **Gray / binary**: after [`PixelBuffer::to_gray_scale`] each sample is a
//!   luma value in `0..=255`; after [`PixelBuffer::filter`] it is either
//!   [`INK`] or [`PAPER`]
//!
//! Both passes mutate the samples in place and never resize the buffer.

mod access;
mod convert;
mod filter;

pub use filter::compute_otsu_threshold;

use crate::color;
use crate::error::{Error, Result};

/// Sample value of an ink pixel after [`PixelBuffer::filter`].
pub const INK: u32 = 0;

/// Sample value of a background pixel after [`PixelBuffer::filter`].
pub const PAPER: u32 = 255;

/// Row-major pixel samples.
///
/// # Examples
///
/// ```
/// use glyphscan_core::PixelBuffer;
///
/// let buffer = PixelBuffer::new(640, 480).unwrap();
/// assert_eq!(buffer.width(), 640);
/// assert_eq!(buffer.height(), 480);
/// assert_eq!(buffer.samples().len(), 640 * 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u32>,
}

impl PixelBuffer {
    /// Create a new buffer with every sample set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new buffer with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            samples: vec![value; len],
        })
    }

    /// Wrap existing row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty size and
    /// [`Error::DimensionMismatch`] if `samples.len() != width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if samples.len() != expected {
            return Err(Error::DimensionMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a packed-color buffer from 8-bit gray values.
    ///
    /// Each gray value is replicated into the three color channels, so the
    /// result goes through [`PixelBuffer::to_gray_scale`] unchanged.
    pub fn from_gray(width: u32, height: u32, gray: &[u8]) -> Result<Self> {
        let samples = gray.iter().map(|&g| color::compose_gray(g)).collect();
        Self::from_samples(width, height, samples)
    }

    /// Get the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get all samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<u32> {
        self.samples
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
