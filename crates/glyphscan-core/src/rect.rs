//! Rect - half-open rectangle
//!
//! `x2` and `y2` are exclusive, so `width = x2 - x1`. Every rectangle
//! reported by the segmenter uses this convention.

/// A half-open rectangle `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x1: u32,
    /// Top edge (inclusive)
    pub y1: u32,
    /// Right edge (exclusive)
    pub x2: u32,
    /// Bottom edge (exclusive)
    pub y2: u32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width in pixels (0 for an inverted rectangle).
    #[inline]
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Height in pixels (0 for an inverted rectangle).
    #[inline]
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Check whether the rectangle covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check whether (x, y) lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Clip the rectangle to `[0, width) x [0, height)`.
    ///
    /// The result is never inverted; a rectangle entirely outside the
    /// bounds clips to an empty one.
    pub fn clip(&self, width: u32, height: u32) -> Rect {
        let x1 = self.x1.min(width);
        let y1 = self.y1.min(height);
        Rect {
            x1,
            y1,
            x2: self.x2.min(width).max(x1),
            y2: self.y2.min(height).max(y1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let r = Rect::new(2, 3, 7, 5);
        assert_eq!(r.width(), 5);
        assert_eq!(r.height(), 2);
        assert_eq!(r.area(), 10);
        assert!(!r.is_empty());
        assert!(Rect::new(4, 4, 4, 9).is_empty());
        assert_eq!(Rect::new(9, 0, 4, 1).width(), 0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(0, 0, 3, 3);
        assert!(r.contains(2, 2));
        assert!(!r.contains(3, 2));
        assert!(!r.contains(2, 3));
    }

    #[test]
    fn test_clip() {
        assert_eq!(Rect::new(5, 5, 20, 8).clip(10, 10), Rect::new(5, 5, 10, 8));
        let outside = Rect::new(15, 15, 20, 20).clip(10, 10);
        assert!(outside.is_empty());
        assert_eq!(outside.x1, 10);
        assert_eq!(outside.x2, 10);
    }
}
