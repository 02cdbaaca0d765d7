//! Sample access functions
//!
//! Bounds-checked and unchecked getters and setters, plus row slices and a
//! few ink queries used by the segmenter.

use super::{INK, PixelBuffer};
use crate::error::{Error, Result};
use crate::rect::Rect;

impl PixelBuffer {
    /// Get a sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.samples[self.index(x, y)])
    }

    /// Get a sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y * width + x` is outside the sample vector.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u32 {
        self.samples[self.index(x, y)]
    }

    /// Set a sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.samples[idx] = value;
        Ok(())
    }

    /// Get one row of samples.
    ///
    /// Returns `None` if `y` is out of bounds.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.samples[start..start + self.width as usize])
    }

    /// Fill a rectangle with `value`, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: &Rect, value: u32) {
        let clipped = rect.clip(self.width, self.height);
        for y in clipped.y1..clipped.y2 {
            let start = self.index(clipped.x1, y);
            let end = self.index(clipped.x2, y);
            self.samples[start..end].fill(value);
        }
    }

    /// Count samples darker than `threshold` inside `rect`.
    ///
    /// `rect` is clipped to the buffer first.
    pub fn count_ink(&self, rect: &Rect, threshold: u32) -> u32 {
        let clipped = rect.clip(self.width, self.height);
        let mut count = 0;
        for y in clipped.y1..clipped.y2 {
            let start = self.index(clipped.x1, y);
            let end = self.index(clipped.x2, y);
            count += self.samples[start..end]
                .iter()
                .filter(|&&s| s < threshold)
                .count() as u32;
        }
        count
    }

    /// Bounding box of samples darker than `threshold` inside `rect`.
    ///
    /// Returns `None` when the rectangle holds no ink.
    pub fn ink_bounds(&self, rect: &Rect, threshold: u32) -> Option<Rect> {
        let clipped = rect.clip(self.width, self.height);
        let mut bounds: Option<Rect> = None;
        for y in clipped.y1..clipped.y2 {
            for x in clipped.x1..clipped.x2 {
                if self.get_unchecked(x, y) < threshold {
                    bounds = Some(match bounds {
                        None => Rect::new(x, y, x + 1, y + 1),
                        Some(b) => Rect::new(
                            b.x1.min(x),
                            b.y1.min(y),
                            b.x2.max(x + 1),
                            b.y2.max(y + 1),
                        ),
                    });
                }
            }
        }
        bounds
    }

    /// Whether the sample at (x, y) is [`INK`].
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == Some(INK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PAPER;

    #[test]
    fn test_get_set() {
        let mut buffer = PixelBuffer::new(10, 5).unwrap();
        buffer.set(9, 4, 77).unwrap();
        assert_eq!(buffer.get(9, 4), Some(77));
        assert_eq!(buffer.get_unchecked(9, 4), 77);
        assert_eq!(buffer.get(10, 4), None);
        assert!(matches!(
            buffer.set(3, 5, 1),
            Err(Error::IndexOutOfBounds { x: 3, y: 5, .. })
        ));
    }

    #[test]
    fn test_row_slice() {
        let mut buffer = PixelBuffer::new(4, 3).unwrap();
        buffer.set(2, 1, 9).unwrap();
        assert_eq!(buffer.row(1), Some(&[0, 0, 9, 0][..]));
        assert!(buffer.row(3).is_none());
    }

    #[test]
    fn test_fill_rect_and_count_ink() {
        let mut buffer = PixelBuffer::new_filled(10, 10, PAPER).unwrap();
        buffer.fill_rect(&Rect::new(2, 3, 5, 7), INK);
        assert_eq!(buffer.count_ink(&Rect::new(0, 0, 10, 10), 128), 12);
        assert_eq!(buffer.count_ink(&Rect::new(0, 0, 3, 4), 128), 1);
        // Clipped against the buffer edge
        buffer.fill_rect(&Rect::new(8, 8, 20, 20), INK);
        assert_eq!(buffer.count_ink(&Rect::new(0, 0, 10, 10), 128), 16);
    }

    #[test]
    fn test_ink_bounds() {
        let mut buffer = PixelBuffer::new_filled(10, 10, PAPER).unwrap();
        assert!(buffer.ink_bounds(&Rect::new(0, 0, 10, 10), 128).is_none());

        buffer.set(3, 2, INK).unwrap();
        buffer.set(6, 8, INK).unwrap();
        assert_eq!(
            buffer.ink_bounds(&Rect::new(0, 0, 10, 10), 128),
            Some(Rect::new(3, 2, 7, 9))
        );
        assert_eq!(
            buffer.ink_bounds(&Rect::new(0, 0, 5, 5), 128),
            Some(Rect::new(3, 2, 4, 3))
        );
        assert!(buffer.is_ink(3, 2));
        assert!(!buffer.is_ink(0, 0));
    }
}
