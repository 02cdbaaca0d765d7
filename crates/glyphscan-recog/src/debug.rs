//! Debug output for scans
//!
//! A [`DebugSink`] observes a scan: the rows found, every glyph cell with
//! its ranked candidates, and every word space. [`BoxOverlay`] draws that
//! geometry onto a gray copy of the page for visual inspection.

use glyphscan_core::{PixelBuffer, Rect};

use crate::recog::MatchCandidate;
use crate::segment::GlyphCell;

/// Observer of scan geometry. All methods default to no-ops.
pub trait DebugSink {
    /// A text row spanning `y1..y2`
    fn row(&mut self, _y1: u32, _y2: u32) {}

    /// A glyph cell and its ranked candidates, best first
    fn char_cell(&mut self, _cell: &GlyphCell, _matches: &[MatchCandidate]) {}

    /// A word space
    fn space(&mut self, _space: &Rect) {}
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebug;

impl DebugSink for NoDebug {}

/// Gray level of row guides
pub const ROW_GUIDE: u32 = 200;
/// Gray level of matched cell outlines
pub const MATCHED_OUTLINE: u32 = 96;
/// Gray level of unmatched cell outlines
pub const UNMATCHED_OUTLINE: u32 = 160;
/// Gray level of space fills
pub const SPACE_FILL: u32 = 230;

/// Draws scan geometry onto a gray canvas.
#[derive(Debug, Clone)]
pub struct BoxOverlay {
    canvas: PixelBuffer,
}

impl BoxOverlay {
    /// Start from a gray (or filtered) copy of the scanned page
    pub fn new(canvas: PixelBuffer) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn into_canvas(self) -> PixelBuffer {
        self.canvas
    }

    fn outline(&mut self, r: &Rect, value: u32) {
        if r.is_empty() {
            return;
        }
        self.canvas.fill_rect(&Rect::new(r.x1, r.y1, r.x2, r.y1 + 1), value);
        self.canvas.fill_rect(&Rect::new(r.x1, r.y2 - 1, r.x2, r.y2), value);
        self.canvas.fill_rect(&Rect::new(r.x1, r.y1, r.x1 + 1, r.y2), value);
        self.canvas.fill_rect(&Rect::new(r.x2 - 1, r.y1, r.x2, r.y2), value);
    }
}

impl DebugSink for BoxOverlay {
    fn row(&mut self, y1: u32, y2: u32) {
        let w = self.canvas.width();
        self.canvas.fill_rect(&Rect::new(0, y1.saturating_sub(1), w, y1), ROW_GUIDE);
        self.canvas.fill_rect(&Rect::new(0, y2, w, y2 + 1), ROW_GUIDE);
    }

    fn char_cell(&mut self, cell: &GlyphCell, matches: &[MatchCandidate]) {
        let value = if matches.is_empty() {
            UNMATCHED_OUTLINE
        } else {
            MATCHED_OUTLINE
        };
        self.outline(&cell.bounds, value);
    }

    fn space(&mut self, space: &Rect) {
        self.canvas.fill_rect(space, SPACE_FILL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphscan_core::PAPER;

    #[test]
    fn test_overlay_draws_outline() {
        let mut overlay = BoxOverlay::new(PixelBuffer::new_filled(8, 8, PAPER).unwrap());
        let cell = GlyphCell {
            bounds: Rect::new(2, 2, 6, 6),
            row_y1: 2,
            row_y2: 6,
        };
        overlay.char_cell(&cell, &[]);
        let canvas = overlay.into_canvas();
        assert_eq!(canvas.get(2, 2), Some(UNMATCHED_OUTLINE));
        assert_eq!(canvas.get(5, 5), Some(UNMATCHED_OUTLINE));
        assert_eq!(canvas.get(3, 3), Some(PAPER));
        assert_eq!(canvas.get(1, 1), Some(PAPER));
    }

    #[test]
    fn test_overlay_row_and_space() {
        let mut overlay = BoxOverlay::new(PixelBuffer::new_filled(6, 10, PAPER).unwrap());
        overlay.row(0, 9);
        overlay.space(&Rect::new(1, 3, 3, 5));
        let canvas = overlay.canvas();
        assert_eq!(canvas.get(0, 9), Some(ROW_GUIDE));
        assert_eq!(canvas.get(0, 0), Some(PAPER));
        assert_eq!(canvas.get(2, 4), Some(SPACE_FILL));
    }
}
