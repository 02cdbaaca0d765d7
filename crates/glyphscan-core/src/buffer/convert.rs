//! Grayscale conversion
//!
//! Replaces packed color samples with a single luma value in `0..=255`.

use super::PixelBuffer;
use crate::color;

/// Default perceptual weights for RGB-to-gray conversion.
const RED_WEIGHT: f32 = 0.3;
const GREEN_WEIGHT: f32 = 0.5;
const BLUE_WEIGHT: f32 = 0.2;

impl PixelBuffer {
    /// Convert every packed color sample to gray, in place.
    ///
    /// With `use_average` the three channels are averaged with equal
    /// weight; otherwise the perceptual weights 0.3R + 0.5G + 0.2B are used.
    /// The alpha channel is ignored.
    pub fn to_gray_scale(&mut self, use_average: bool) {
        for sample in self.samples.iter_mut() {
            let (r, g, b) = color::extract_rgb(*sample);
            *sample = if use_average {
                (r as u32 + g as u32 + b as u32) / 3
            } else {
                luma(r, g, b)
            };
        }
    }
}

fn luma(r: u8, g: u8, b: u8) -> u32 {
    let gray = RED_WEIGHT * r as f32 + GREEN_WEIGHT * g as f32 + BLUE_WEIGHT * b as f32 + 0.5;
    (gray as u32).min(255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        let mut buffer = PixelBuffer::from_samples(
            3,
            1,
            vec![
                color::compose_rgb(30, 60, 90),
                color::compose_gray(255),
                color::compose_rgb(255, 0, 0),
            ],
        )
        .unwrap();
        buffer.to_gray_scale(true);
        assert_eq!(buffer.samples(), &[60, 255, 85]);
    }

    #[test]
    fn test_perceptual() {
        let mut buffer = PixelBuffer::from_samples(
            3,
            1,
            vec![
                color::compose_rgb(255, 0, 0),
                color::compose_rgb(0, 255, 0),
                color::compose_gray(255),
            ],
        )
        .unwrap();
        buffer.to_gray_scale(false);
        // 0.3 * 255 = 76.5, 0.5 * 255 = 127.5
        assert_eq!(buffer.samples(), &[77, 128, 255]);
    }

    #[test]
    fn test_dimensions_unchanged() {
        let mut buffer = PixelBuffer::new(7, 3).unwrap();
        buffer.to_gray_scale(false);
        assert_eq!((buffer.width(), buffer.height()), (7, 3));
        assert_eq!(buffer.samples().len(), 21);
    }
}
