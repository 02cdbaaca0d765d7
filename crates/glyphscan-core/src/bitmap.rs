//! GlyphBitmap - rasterized training input
//!
//! A glyph bitmap is a small 8-bit gray image holding one character inside
//! its frame. The frame's height stands for the text row the glyph was cut
//! from, so the white space above and below the ink is meaningful.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// An 8-bit grayscale bitmap (0 = black, 255 = white).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl GlyphBitmap {
    /// Create a bitmap from row-major gray samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty size and
    /// [`Error::DimensionMismatch`] if the sample count is wrong.
    pub fn new(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
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

    /// Create a bitmap with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Self::new(width, height, vec![value; (width as usize) * (height as usize)])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Get a sample, or `None` outside the bitmap.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[(y as usize) * (self.width as usize) + x as usize])
    }

    /// Set a sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the bitmap.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.samples[(y as usize) * (self.width as usize) + x as usize] = value;
        Ok(())
    }

    /// Copy the bitmap into a packed-color [`PixelBuffer`].
    pub fn to_pixel_buffer(&self) -> Result<PixelBuffer> {
        PixelBuffer::from_gray(self.width, self.height, &self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(GlyphBitmap::new(0, 3, vec![]).is_err());
        assert!(matches!(
            GlyphBitmap::new(2, 2, vec![0; 3]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_get_set() {
        let mut bitmap = GlyphBitmap::filled(3, 2, 255).unwrap();
        bitmap.set(2, 1, 0).unwrap();
        assert_eq!(bitmap.get(2, 1), Some(0));
        assert_eq!(bitmap.get(3, 1), None);
        assert!(bitmap.set(0, 2, 0).is_err());
    }

    #[test]
    fn test_to_pixel_buffer() {
        let mut bitmap = GlyphBitmap::filled(3, 2, 255).unwrap();
        bitmap.set(1, 0, 0).unwrap();
        let mut buffer = bitmap.to_pixel_buffer().unwrap();
        buffer.to_gray_scale(true);
        assert_eq!(buffer.samples(), &[255, 0, 255, 255, 255, 255]);
    }
}
