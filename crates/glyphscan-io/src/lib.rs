//! glyphscan-io - image loading for glyphscan
//!
//! Decodes image files or in-memory data into packed-color
//! [`PixelBuffer`]s for recognition, and writes gray buffers out as PNG
//! for inspecting filtered pages and debug overlays.
//!
//! Decoding goes through the `image` crate; the container format is
//! detected from the leading magic bytes.

mod error;
pub mod format;

use std::io::Cursor;
use std::path::Path;

use glyphscan_core::PixelBuffer;
use glyphscan_core::color::compose_rgb;
use image::{DynamicImage, GrayImage};
use tracing::debug;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

/// Read an image file into a packed-color buffer.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let buffer = decode_image(&data)?;
    debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "loaded image"
    );
    Ok(buffer)
}

/// Decode encoded image data into a packed-color buffer.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown signatures and
/// [`IoError::Decode`] if the decoder rejects the data.
pub fn decode_image(data: &[u8]) -> IoResult<PixelBuffer> {
    let format = detect_format_from_bytes(data)?;
    let image = image::load_from_memory_with_format(data, format.to_image_format())
        .map_err(|e| IoError::Decode(format!("{format:?}: {e}")))?;
    from_dynamic_image(&image)
}

/// Convert a decoded image to a packed-color buffer.
///
/// Alpha is dropped; every sample is composed as opaque `0xRRGGBBFF`.
pub fn from_dynamic_image(image: &DynamicImage) -> IoResult<PixelBuffer> {
    let rgb = image.to_rgb8();
    let samples = rgb
        .pixels()
        .map(|p| compose_rgb(p.0[0], p.0[1], p.0[2]))
        .collect();
    Ok(PixelBuffer::from_samples(rgb.width(), rgb.height(), samples)?)
}

/// Gray samples of `buffer` as an 8-bit image, clamping values above 255.
fn to_gray_image(buffer: &PixelBuffer) -> IoResult<GrayImage> {
    let gray: Vec<u8> = buffer.samples().iter().map(|&s| s.min(255) as u8).collect();
    GrayImage::from_raw(buffer.width(), buffer.height(), gray)
        .ok_or_else(|| IoError::Encode("sample count does not match dimensions".to_string()))
}

/// Encode a gray buffer (after `to_gray_scale` or `filter`) as PNG.
pub fn encode_gray_png(buffer: &PixelBuffer) -> IoResult<Vec<u8>> {
    let image = to_gray_image(buffer)?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| IoError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

/// Write a gray buffer to `path` as PNG.
pub fn write_gray_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> IoResult<()> {
    let data = encode_gray_png(buffer)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}
