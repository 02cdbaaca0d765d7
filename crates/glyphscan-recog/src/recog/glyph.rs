//! Reference glyphs
//!
//! A reference glyph is one labeled training sample reduced to its ink
//! bounding box, together with the shape descriptors used to pre-filter
//! candidates before the pixel comparison:
//!
//! - **Aspect ratio**: ink width / ink height
//! - **Top / bottom white space fraction**: blank rows above / below the
//!   ink, as a fraction of the frame (row) height

use glyphscan_core::{GlyphBitmap, PixelBuffer, Rect};

use crate::error::{RecogError, RecogResult};
use crate::segment::DEFAULT_INK_THRESHOLD;

/// Maximum relative aspect-ratio difference, checked in both directions
pub const ASPECT_RATIO_TOLERANCE: f32 = 0.5;

/// Maximum absolute difference of the top white space fractions
pub const TOP_WHITE_SPACE_FRACTION_TOLERANCE: f32 = 0.1;

/// Maximum absolute difference of the bottom white space fractions
pub const BOTTOM_WHITE_SPACE_FRACTION_TOLERANCE: f32 = 0.1;

/// Dimensions at or below this size are too small to rescale reliably
pub const DEGENERATE_DIMENSION: u32 = 4;

/// Scale factor beyond which a tiny dimension is not compared
pub const DEGENERATE_SCALE_FACTOR: u32 = 10;

/// A labeled template used for nearest-neighbour matching.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceGlyph {
    label: char,
    width: u32,
    height: u32,
    samples: Vec<u8>,
    aspect_ratio: f32,
    top_white_space_fraction: f32,
    bottom_white_space_fraction: f32,
}

impl ReferenceGlyph {
    /// Creates a reference glyph from already-cropped gray samples.
    ///
    /// # Arguments
    ///
    /// * `label` - Character this glyph stands for
    /// * `width`, `height` - Size of the ink box
    /// * `samples` - Row-major gray samples of the ink box
    /// * `top_white_space_fraction` - Blank fraction of the row above the ink
    /// * `bottom_white_space_fraction` - Blank fraction of the row below the ink
    pub fn new(
        label: char,
        width: u32,
        height: u32,
        samples: Vec<u8>,
        top_white_space_fraction: f32,
        bottom_white_space_fraction: f32,
    ) -> RecogResult<Self> {
        if width == 0 || height == 0 {
            return Err(glyphscan_core::Error::InvalidDimension { width, height }.into());
        }
        let expected = (width as usize) * (height as usize);
        if samples.len() != expected {
            return Err(glyphscan_core::Error::DimensionMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            }
            .into());
        }
        Ok(Self {
            label,
            width,
            height,
            samples,
            aspect_ratio: width as f32 / height as f32,
            top_white_space_fraction,
            bottom_white_space_fraction,
        })
    }

    /// Builds a reference glyph from a training bitmap.
    ///
    /// The bitmap goes through the same grayscale and filter passes as a
    /// scanned document, is cropped to its ink bounding box, and the white
    /// space fractions are measured against the bitmap's full height.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::NoContent`] if the filtered bitmap holds no ink.
    pub fn from_bitmap(label: char, bitmap: &GlyphBitmap) -> RecogResult<Self> {
        let mut buffer = bitmap.to_pixel_buffer()?;
        buffer.to_gray_scale(true);
        buffer.filter();

        let frame = Rect::new(0, 0, buffer.width(), buffer.height());
        let ink = buffer
            .ink_bounds(&frame, DEFAULT_INK_THRESHOLD)
            .ok_or_else(|| RecogError::NoContent(format!("training bitmap for {label:?}")))?;

        let mut samples = Vec::with_capacity(ink.area() as usize);
        for y in ink.y1..ink.y2 {
            for x in ink.x1..ink.x2 {
                samples.push(buffer.get_unchecked(x, y).min(255) as u8);
            }
        }

        let frame_h = frame.height() as f32;
        Self::new(
            label,
            ink.width(),
            ink.height(),
            samples,
            ink.y1 as f32 / frame_h,
            (frame.y2 - ink.y2) as f32 / frame_h,
        )
    }

    /// Character label
    pub fn label(&self) -> char {
        self.label
    }

    /// Width of the ink box
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the ink box
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major samples of the ink box
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Width / height of the ink box
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Blank fraction above the ink
    pub fn top_white_space_fraction(&self) -> f32 {
        self.top_white_space_fraction
    }

    /// Blank fraction below the ink
    pub fn bottom_white_space_fraction(&self) -> f32 {
        self.bottom_white_space_fraction
    }

    /// Cheap shape test run before [`ReferenceGlyph::distance_to`].
    ///
    /// Rejects the glyph when the aspect ratios differ by more than
    /// [`ASPECT_RATIO_TOLERANCE`] in either direction, when a white space
    /// fraction is out of tolerance, or when one side has a dimension of at
    /// most [`DEGENERATE_DIMENSION`] pixels while the other is at least
    /// [`DEGENERATE_SCALE_FACTOR`] times larger.
    pub fn is_candidate(
        &self,
        aspect_ratio: f32,
        width: u32,
        height: u32,
        top_white_space_fraction: f32,
        bottom_white_space_fraction: f32,
    ) -> bool {
        if (aspect_ratio / self.aspect_ratio - 1.0).abs() > ASPECT_RATIO_TOLERANCE
            || (self.aspect_ratio / aspect_ratio - 1.0).abs() > ASPECT_RATIO_TOLERANCE
        {
            return false;
        }
        if (top_white_space_fraction - self.top_white_space_fraction).abs()
            > TOP_WHITE_SPACE_FRACTION_TOLERANCE
        {
            return false;
        }
        if (bottom_white_space_fraction - self.bottom_white_space_fraction).abs()
            > BOTTOM_WHITE_SPACE_FRACTION_TOLERANCE
        {
            return false;
        }
        !(is_degenerate_pair(width, self.width) || is_degenerate_pair(height, self.height))
    }

    /// Mean squared error between this glyph and a region of `buffer`.
    ///
    /// The glyph is resampled (nearest neighbour) onto the region's pixel
    /// grid, so the error is averaged over the region's pixel count. The
    /// region is clipped to the buffer; an empty region scores
    /// `f64::INFINITY`.
    pub fn distance_to(&self, buffer: &PixelBuffer, region: &Rect) -> f64 {
        let area = region.clip(buffer.width(), buffer.height());
        if area.is_empty() {
            return f64::INFINITY;
        }
        let aw = area.width() as u64;
        let ah = area.height() as u64;
        let gw = self.width as u64;
        let gh = self.height as u64;

        let mut sum = 0.0f64;
        for dy in 0..ah {
            let ry = (dy * gh / ah) as usize;
            let row = &self.samples[ry * self.width as usize..(ry + 1) * self.width as usize];
            for dx in 0..aw {
                let rx = (dx * gw / aw) as usize;
                let sample = buffer.get_unchecked(area.x1 + dx as u32, area.y1 + dy as u32);
                let diff = sample.min(255) as f64 - row[rx] as f64;
                sum += diff * diff;
            }
        }
        sum / (aw * ah) as f64
    }
}

/// A tiny dimension paired with a much larger one on the other side.
fn is_degenerate_pair(a: u32, b: u32) -> bool {
    (a <= DEGENERATE_DIMENSION && b >= a.saturating_mul(DEGENERATE_SCALE_FACTOR))
        || (b <= DEGENERATE_DIMENSION && a >= b.saturating_mul(DEGENERATE_SCALE_FACTOR))
}
