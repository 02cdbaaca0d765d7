//! Image format detection
//!
//! Detects image formats from the file header using `image::guess_format`.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Image formats accepted by [`crate::decode_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Bmp,
    Png,
    Jpeg,
    Gif,
    Tiff,
    WebP,
    Pnm,
}

impl ImageFormat {
    /// The matching `image` crate format
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Pnm => image::ImageFormat::Pnm,
        }
    }

    /// Usual file extension
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Tiff => "tif",
            ImageFormat::WebP => "webp",
            ImageFormat::Pnm => "pnm",
        }
    }
}

/// Bytes read from a file header for detection
const HEADER_LEN: usize = 16;

impl ImageFormat {
    /// Map an `image` crate format onto the formats glyphscan decodes
    fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Bmp => Some(ImageFormat::Bmp),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Gif => Some(ImageFormat::Gif),
            image::ImageFormat::Tiff => Some(ImageFormat::Tiff),
            image::ImageFormat::WebP => Some(ImageFormat::WebP),
            image::ImageFormat::Pnm => Some(ImageFormat::Pnm),
            _ => None,
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; HEADER_LEN];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from the leading bytes of encoded data.
///
/// Signatures are matched by [`image::guess_format`]; formats it knows but
/// glyphscan does not decode are reported as unsupported.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    let format = image::guess_format(data)
        .map_err(|_| IoError::UnsupportedFormat("unknown image format".to_string()))?;
    ImageFormat::from_image_format(format)
        .ok_or_else(|| IoError::UnsupportedFormat(format!("{format:?}")))
}
