//! Binarization and noise removal
//!
//! [`PixelBuffer::filter`] turns a gray buffer into a clean two-level
//! bitmap suitable for bounding-box analysis:
//!
//! 1. **Threshold selection**: Otsu's method on the gray histogram, or a
//!    fixed mid-level threshold when the buffer has almost no contrast
//! 2. **Binarization**: samples at or below the threshold become [`INK`],
//!    all others [`PAPER`]
//! 3. **Despeckle**: ink pixels without a single 8-connected ink neighbour
//!    are reset to paper
//!
//! The pass is deterministic and never changes the buffer dimensions.

use super::{INK, PAPER, PixelBuffer};

/// Below this gray range the buffer is considered uniform.
const MIN_CONTRAST: u32 = 32;

/// Threshold used for uniform buffers.
const FIXED_THRESHOLD: u8 = 127;

/// Compute Otsu's threshold from a 256-bin gray histogram.
///
/// Returns the largest gray level that still belongs to the dark class.
/// An empty histogram yields 0.
pub fn compute_otsu_threshold(histogram: &[u32; 256]) -> u8 {
    let total: f64 = histogram.iter().map(|&c| c as f64).sum();
    if total == 0.0 {
        return 0;
    }
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut weight_dark = 0.0;
    let mut sum_dark = 0.0;
    let mut best_variance = -1.0;
    let mut threshold = 0u8;

    for (level, &count) in histogram.iter().enumerate() {
        weight_dark += count as f64;
        if weight_dark == 0.0 {
            continue;
        }
        let weight_light = total - weight_dark;
        if weight_light == 0.0 {
            break;
        }
        sum_dark += level as f64 * count as f64;
        let mean_dark = sum_dark / weight_dark;
        let mean_light = (sum_all - sum_dark) / weight_light;
        let variance = weight_dark * weight_light * (mean_dark - mean_light).powi(2);
        if variance > best_variance {
            best_variance = variance;
            threshold = level as u8;
        }
    }

    threshold
}

impl PixelBuffer {
    /// Binarize and despeckle the buffer in place.
    ///
    /// Expects gray samples (see [`PixelBuffer::to_gray_scale`]); values
    /// above 255 are treated as 255. After this call every sample is either
    /// [`INK`] or [`PAPER`].
    pub fn filter(&mut self) {
        let threshold = self.select_threshold();
        for sample in self.samples.iter_mut() {
            *sample = if (*sample).min(255) <= threshold as u32 {
                INK
            } else {
                PAPER
            };
        }
        self.remove_isolated_ink();
    }

    fn select_threshold(&self) -> u8 {
        let mut histogram = [0u32; 256];
        let mut min = 255u32;
        let mut max = 0u32;
        for &sample in &self.samples {
            let v = sample.min(255);
            histogram[v as usize] += 1;
            min = min.min(v);
            max = max.max(v);
        }
        if max - min < MIN_CONTRAST {
            FIXED_THRESHOLD
        } else {
            compute_otsu_threshold(&histogram)
        }
    }

    fn remove_isolated_ink(&mut self) {
        let w = self.width as i64;
        let h = self.height as i64;
        let ink: Vec<bool> = self.samples.iter().map(|&s| s == INK).collect();
        let has_ink =
            |x: i64, y: i64| x >= 0 && y >= 0 && x < w && y < h && ink[(y * w + x) as usize];

        for y in 0..h {
            for x in 0..w {
                if !ink[(y * w + x) as usize] {
                    continue;
                }
                let mut neighbours = false;
                'search: for dy in -1..=1 {
                    for dx in -1..=1 {
                        if (dx != 0 || dy != 0) && has_ink(x + dx, y + dy) {
                            neighbours = true;
                            break 'search;
                        }
                    }
                }
                if !neighbours {
                    self.samples[(y * w + x) as usize] = PAPER;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;

    fn gray_buffer(w: u32, h: u32, fill: u32) -> PixelBuffer {
        PixelBuffer::new_filled(w, h, fill).unwrap()
    }

    #[test]
    fn test_otsu_two_levels() {
        let mut histogram = [0u32; 256];
        histogram[20] = 50;
        histogram[220] = 150;
        let t = compute_otsu_threshold(&histogram);
        assert!((20..220).contains(&t), "threshold {t}");
    }

    #[test]
    fn test_otsu_empty_histogram() {
        assert_eq!(compute_otsu_threshold(&[0; 256]), 0);
    }

    #[test]
    fn test_filter_binarizes() {
        let mut buffer = gray_buffer(8, 8, 230);
        buffer.fill_rect(&Rect::new(2, 2, 6, 6), 40);
        buffer.filter();
        assert_eq!(buffer.count_ink(&Rect::new(0, 0, 8, 8), 128), 16);
        assert!(buffer.samples().iter().all(|&s| s == INK || s == PAPER));
    }

    #[test]
    fn test_filter_removes_isolated_pixel() {
        let mut buffer = gray_buffer(8, 8, 255);
        buffer.fill_rect(&Rect::new(0, 0, 3, 3), 0);
        buffer.set(6, 6, 0).unwrap();
        buffer.filter();
        assert_eq!(buffer.get(6, 6), Some(PAPER));
        assert_eq!(buffer.get(1, 1), Some(INK));
    }

    #[test]
    fn test_filter_keeps_diagonal_pairs() {
        let mut buffer = gray_buffer(6, 6, 255);
        buffer.set(2, 2, 0).unwrap();
        buffer.set(3, 3, 0).unwrap();
        buffer.filter();
        assert_eq!(buffer.get(2, 2), Some(INK));
        assert_eq!(buffer.get(3, 3), Some(INK));
    }

    #[test]
    fn test_filter_uniform_buffers() {
        let mut blank = gray_buffer(5, 5, 250);
        blank.filter();
        assert!(blank.samples().iter().all(|&s| s == PAPER));

        let mut solid = gray_buffer(5, 5, 10);
        solid.filter();
        assert!(solid.samples().iter().all(|&s| s == INK));
    }

    #[test]
    fn test_filter_is_idempotent_on_binary() {
        let mut buffer = gray_buffer(10, 6, PAPER);
        buffer.fill_rect(&Rect::new(1, 1, 4, 5), INK);
        buffer.fill_rect(&Rect::new(6, 2, 9, 3), INK);
        let before = buffer.clone();
        buffer.filter();
        assert_eq!(buffer, before);
    }
}
