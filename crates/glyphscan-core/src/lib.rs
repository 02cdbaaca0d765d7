//! glyphscan-core - Basic data structures for the glyphscan OCR engine
//!
//! This crate provides the fundamental data structures shared by the
//! segmentation and recognition crates:
//!
//! - [`PixelBuffer`] - Row-major pixel samples with in-place grayscale
//!   conversion and binarization
//! - [`GlyphBitmap`] - A small grayscale bitmap used as training input
//! - [`Rect`] - Half-open rectangle used for cells and ink bounds
//!
//! # Example
//!
//! ```
//! use glyphscan_core::{PixelBuffer, color};
//!
//! let mut buffer = PixelBuffer::new_filled(4, 3, color::compose_gray(255)).unwrap();
//! buffer.set(1, 1, color::compose_rgb(10, 10, 10)).unwrap();
//! buffer.to_gray_scale(true);
//! buffer.filter();
//! // A lone dark pixel is treated as noise
//! assert_eq!(buffer.get(1, 1), Some(255));
//! ```

pub mod bitmap;
pub mod buffer;
pub mod error;
pub mod rect;

pub use bitmap::GlyphBitmap;
pub use buffer::{INK, PAPER, PixelBuffer};
pub use error::{Error, Result};
pub use rect::Rect;

/// Color channel helpers for packed 32-bit pixels.
///
/// # Pixel format
///
/// Packed pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a packed pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a packed pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a packed pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a packed RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Compose a packed pixel with all three channels set to `value`.
    #[inline]
    pub fn compose_gray(value: u8) -> u32 {
        compose_rgb(value, value, value)
    }

    /// Extract RGB values from a packed pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_and_extract() {
            let pixel = compose_rgb(0x12, 0x34, 0x56);
            assert_eq!(pixel, 0x123456ff);
            assert_eq!(extract_rgb(pixel), (0x12, 0x34, 0x56));
        }

        #[test]
        fn test_compose_gray() {
            assert_eq!(extract_rgb(compose_gray(200)), (200, 200, 200));
        }
    }
}
