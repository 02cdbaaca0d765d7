//! Document segmentation
//!
//! This module splits a binarized [`PixelBuffer`] region into text rows,
//! glyph cells and word spaces, and pushes them to a [`SegmentListener`]
//! in reading order (top to bottom, then left to right).
//!
//! # Algorithm Overview
//!
//! 1. **Row detection**: Scanlines with at least one ink pixel form runs;
//!    runs separated by more than `min_row_gap` blank scanlines are
//!    separate rows
//! 2. **Short-row merging**: Rows much shorter than the tallest row
//!    (detached dots, accents) are merged into the nearest neighbouring row
//!    when the gap to it is small; a short row far from every other row is
//!    a line of its own
//! 3. **Cell detection**: Within a row, columns with ink form runs split by
//!    blank column gaps of at least `min_char_break`; each run is tightened
//!    to its ink bounding box and dropped as noise if it holds fewer than
//!    `min_ink_pixels` ink pixels
//! 4. **Space detection**: A gap between consecutive cells at least
//!    `space_width_fraction` of the row height wide is a word space

use glyphscan_core::{PixelBuffer, Rect};
use tracing::{debug, trace};

use crate::error::{RecogError, RecogResult};

/// Samples below this value count as ink
pub const DEFAULT_INK_THRESHOLD: u32 = 128;

/// Options for document segmentation
#[derive(Debug, Clone)]
pub struct SegmenterOptions {
    /// Samples below this value are ink (default: 128)
    pub ink_threshold: u32,
    /// Blank scanline gaps wider than this split rows (default: 1)
    pub min_row_gap: u32,
    /// Rows shorter than this fraction of the tallest row are merged into
    /// a neighbour; 0 disables merging (default: 0.25)
    pub short_row_fraction: f32,
    /// Widest gap to the neighbour, as a fraction of the tallest row, across
    /// which a short row is still merged (default: 0.25)
    pub max_merge_gap_fraction: f32,
    /// Cells with fewer ink pixels are discarded as noise (default: 3)
    pub min_ink_pixels: u32,
    /// Minimum word gap as a fraction of the row height (default: 0.6)
    pub space_width_fraction: f32,
    /// Blank column gaps at least this wide split cells (default: 1)
    pub min_char_break: u32,
}

impl Default for SegmenterOptions {
    fn default() -> Self {
        Self {
            ink_threshold: DEFAULT_INK_THRESHOLD,
            min_row_gap: 1,
            short_row_fraction: 0.25,
            max_merge_gap_fraction: 0.25,
            min_ink_pixels: 3,
            space_width_fraction: 0.6,
            min_char_break: 1,
        }
    }
}

impl SegmenterOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ink threshold
    pub fn with_ink_threshold(mut self, threshold: u32) -> Self {
        self.ink_threshold = threshold;
        self
    }

    /// Set the widest blank gap that does not split rows
    pub fn with_min_row_gap(mut self, gap: u32) -> Self {
        self.min_row_gap = gap;
        self
    }

    /// Set the short-row merge fraction
    pub fn with_short_row_fraction(mut self, fraction: f32) -> Self {
        self.short_row_fraction = fraction;
        self
    }

    /// Set the widest gap a short row is merged across
    pub fn with_max_merge_gap_fraction(mut self, fraction: f32) -> Self {
        self.max_merge_gap_fraction = fraction;
        self
    }

    /// Set the noise threshold
    pub fn with_min_ink_pixels(mut self, pixels: u32) -> Self {
        self.min_ink_pixels = pixels;
        self
    }

    /// Set the word space fraction
    pub fn with_space_width_fraction(mut self, fraction: f32) -> Self {
        self.space_width_fraction = fraction;
        self
    }

    /// Set the narrowest gap that splits cells
    pub fn with_min_char_break(mut self, width: u32) -> Self {
        self.min_char_break = width;
        self
    }

    /// Validate options
    pub(crate) fn validate(&self) -> RecogResult<()> {
        if self.ink_threshold == 0 || self.ink_threshold > 255 {
            return Err(RecogError::InvalidParameter(
                "ink_threshold must be between 1 and 255".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.short_row_fraction) {
            return Err(RecogError::InvalidParameter(
                "short_row_fraction must be in [0, 1)".to_string(),
            ));
        }
        if !(self.max_merge_gap_fraction >= 0.0) {
            return Err(RecogError::InvalidParameter(
                "max_merge_gap_fraction must not be negative".to_string(),
            ));
        }
        if !(self.space_width_fraction > 0.0) {
            return Err(RecogError::InvalidParameter(
                "space_width_fraction must be positive".to_string(),
            ));
        }
        if self.min_char_break == 0 {
            return Err(RecogError::InvalidParameter(
                "min_char_break must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inclusive scan rectangle; a zero bound means the buffer edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl ScanRegion {
    /// The whole buffer
    pub fn full() -> Self {
        Self::default()
    }

    /// Create a region from inclusive bounds
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Substitute edges for zero bounds and convert to a half-open [`Rect`].
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidRegion`] if the resolved rectangle is
    /// inverted or extends past the buffer.
    pub fn resolve(&self, width: u32, height: u32) -> RecogResult<Rect> {
        let x2 = if self.x2 == 0 {
            width.saturating_sub(1)
        } else {
            self.x2
        };
        let y2 = if self.y2 == 0 {
            height.saturating_sub(1)
        } else {
            self.y2
        };
        if self.x1 > x2 || self.y1 > y2 || x2 >= width || y2 >= height {
            return Err(RecogError::InvalidRegion {
                x1: self.x1,
                y1: self.y1,
                x2,
                y2,
                width,
                height,
            });
        }
        Ok(Rect::new(self.x1, self.y1, x2 + 1, y2 + 1))
    }
}

/// Bounding box of one glyph cell within its row.
///
/// All coordinates are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    /// Ink bounding box of the cell
    pub bounds: Rect,
    /// Top of the enclosing row
    pub row_y1: u32,
    /// Bottom of the enclosing row (exclusive)
    pub row_y2: u32,
}

impl GlyphCell {
    /// Height of the enclosing row
    pub fn row_height(&self) -> u32 {
        self.row_y2 - self.row_y1
    }

    /// Cell width / cell height
    pub fn aspect_ratio(&self) -> f32 {
        self.bounds.width() as f32 / self.bounds.height() as f32
    }

    /// Blank fraction of the row above the cell
    pub fn top_white_space_fraction(&self) -> f32 {
        (self.bounds.y1 - self.row_y1) as f32 / self.row_height() as f32
    }

    /// Blank fraction of the row below the cell
    pub fn bottom_white_space_fraction(&self) -> f32 {
        (self.row_y2 - self.bounds.y2) as f32 / self.row_height() as f32
    }
}

/// Receiver of segmentation events.
///
/// Every method defaults to doing nothing, so a listener only implements
/// the events it cares about. A row is always closed by `end_row` before
/// the next `begin_row`.
pub trait SegmentListener {
    /// A text row spanning scanlines `y1..y2` starts
    fn begin_row(&mut self, _buffer: &PixelBuffer, _y1: u32, _y2: u32) {}

    /// One glyph cell of the current row
    fn process_char(&mut self, _buffer: &PixelBuffer, _cell: &GlyphCell) {}

    /// A word gap between two cells of the current row
    fn process_space(&mut self, _buffer: &PixelBuffer, _space: &Rect) {}

    /// The current row is complete
    fn end_row(&mut self, _buffer: &PixelBuffer) {}
}

/// Counts of the events emitted by one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub rows: usize,
    pub chars: usize,
    pub spaces: usize,
    pub noise_cells: usize,
}

/// Splits a binarized buffer into rows, glyph cells and spaces.
#[derive(Debug, Clone, Default)]
pub struct DocumentSegmenter {
    options: SegmenterOptions,
}

impl DocumentSegmenter {
    /// Create a segmenter with the given options
    pub fn new(options: SegmenterOptions) -> RecogResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The active options
    pub fn options(&self) -> &SegmenterOptions {
        &self.options
    }

    /// Scan `region` of `buffer`, pushing events to `listener`.
    ///
    /// The region is validated before anything is emitted, so a malformed
    /// region produces no events at all.
    ///
    /// # Example
    /// ```
    /// use glyphscan_core::{INK, PAPER, PixelBuffer, Rect};
    /// use glyphscan_recog::segment::{DocumentSegmenter, ScanRegion, SegmentListener};
    ///
    /// struct Rows(usize);
    /// impl SegmentListener for Rows {
    ///     fn begin_row(&mut self, _: &PixelBuffer, _: u32, _: u32) {
    ///         self.0 += 1;
    ///     }
    /// }
    ///
    /// let mut buffer = PixelBuffer::new_filled(40, 30, PAPER).unwrap();
    /// buffer.fill_rect(&Rect::new(5, 5, 15, 12), INK);
    /// buffer.fill_rect(&Rect::new(5, 20, 15, 27), INK);
    ///
    /// let mut rows = Rows(0);
    /// let stats = DocumentSegmenter::default()
    ///     .scan(&buffer, &ScanRegion::full(), &mut rows)
    ///     .unwrap();
    /// assert_eq!(rows.0, 2);
    /// assert_eq!(stats.chars, 2);
    /// ```
    pub fn scan<L: SegmentListener + ?Sized>(
        &self,
        buffer: &PixelBuffer,
        region: &ScanRegion,
        listener: &mut L,
    ) -> RecogResult<SegmentStats> {
        let area = region.resolve(buffer.width(), buffer.height())?;
        let mut stats = SegmentStats::default();

        let rows = merge_short_rows(
            self.find_rows(buffer, &area),
            self.options.short_row_fraction,
            self.options.max_merge_gap_fraction,
        );

        for (row_y1, row_y2) in rows {
            trace!(row_y1, row_y2, "begin row");
            listener.begin_row(buffer, row_y1, row_y2);
            stats.rows += 1;

            let cells = self.find_cells(buffer, &area, row_y1, row_y2, &mut stats);
            let space_width = self.min_space_width(row_y2 - row_y1);

            let mut prev_x2: Option<u32> = None;
            for bounds in cells {
                if let Some(x2) = prev_x2
                    && (bounds.x1 - x2) as f32 >= space_width
                {
                    listener.process_space(buffer, &Rect::new(x2, row_y1, bounds.x1, row_y2));
                    stats.spaces += 1;
                }
                let cell = GlyphCell {
                    bounds,
                    row_y1,
                    row_y2,
                };
                listener.process_char(buffer, &cell);
                stats.chars += 1;
                prev_x2 = Some(bounds.x2);
            }

            listener.end_row(buffer);
        }

        debug!(
            rows = stats.rows,
            chars = stats.chars,
            spaces = stats.spaces,
            noise = stats.noise_cells,
            "segmented region"
        );
        Ok(stats)
    }

    /// Find runs of scanlines containing ink
    fn find_rows(&self, buffer: &PixelBuffer, area: &Rect) -> Vec<(u32, u32)> {
        let threshold = self.options.ink_threshold;
        let lines = (area.y1..area.y2)
            .filter(|&y| buffer.count_ink(&Rect::new(area.x1, y, area.x2, y + 1), threshold) > 0);
        group_runs(lines, |gap| gap > self.options.min_row_gap)
    }

    /// Find the glyph cells of one row, left to right
    fn find_cells(
        &self,
        buffer: &PixelBuffer,
        area: &Rect,
        row_y1: u32,
        row_y2: u32,
        stats: &mut SegmentStats,
    ) -> Vec<Rect> {
        let threshold = self.options.ink_threshold;
        let columns = (area.x1..area.x2)
            .filter(|&x| buffer.count_ink(&Rect::new(x, row_y1, x + 1, row_y2), threshold) > 0);
        let runs = group_runs(columns, |gap| gap >= self.options.min_char_break);

        let mut cells = Vec::with_capacity(runs.len());
        for (x1, x2) in runs {
            let Some(bounds) = buffer.ink_bounds(&Rect::new(x1, row_y1, x2, row_y2), threshold)
            else {
                continue;
            };
            if buffer.count_ink(&bounds, threshold) < self.options.min_ink_pixels {
                stats.noise_cells += 1;
                continue;
            }
            cells.push(bounds);
        }
        cells
    }

    fn min_space_width(&self, row_height: u32) -> f32 {
        (self.options.space_width_fraction * row_height as f32).max(1.0)
    }
}

/// Group ascending positions into half-open runs.
///
/// A new run starts when `splits(gap)` holds for the number of skipped
/// positions between the previous run and the next position.
fn group_runs<I, F>(positions: I, splits: F) -> Vec<(u32, u32)>
where
    I: Iterator<Item = u32>,
    F: Fn(u32) -> bool,
{
    let mut runs = Vec::new();
    let mut current: Option<(u32, u32)> = None;
    for p in positions {
        current = match current {
            None => Some((p, p + 1)),
            Some((start, end)) if p > end && splits(p - end) => {
                runs.push((start, end));
                Some((p, p + 1))
            }
            Some((start, _)) => Some((start, p + 1)),
        };
    }
    runs.extend(current);
    runs
}

/// Merge rows shorter than `fraction` of the tallest row into the
/// neighbour across the smaller gap.
///
/// A short row stays on its own when that gap is wider than
/// `max_gap_fraction` of the tallest row.
fn merge_short_rows(
    mut rows: Vec<(u32, u32)>,
    fraction: f32,
    max_gap_fraction: f32,
) -> Vec<(u32, u32)> {
    if rows.len() < 2 || fraction <= 0.0 {
        return rows;
    }
    let tallest = rows.iter().map(|&(y1, y2)| y2 - y1).max().unwrap_or(0);
    let min_height = tallest as f32 * fraction;
    let max_gap = tallest as f32 * max_gap_fraction;

    let mut i = 0;
    while i < rows.len() && rows.len() > 1 {
        let (y1, y2) = rows[i];
        if ((y2 - y1) as f32) >= min_height {
            i += 1;
            continue;
        }
        let gap_above = (i > 0).then(|| y1 - rows[i - 1].1);
        let gap_below = (i + 1 < rows.len()).then(|| rows[i + 1].0 - y2);
        let nearest = match (gap_above, gap_below) {
            (Some(above), Some(below)) if above <= below => Some((i - 1, above)),
            (_, Some(below)) => Some((i + 1, below)),
            (Some(above), None) => Some((i - 1, above)),
            (None, None) => None,
        };
        match nearest {
            Some((target, gap)) if gap as f32 <= max_gap => {
                let (lo, hi) = (i.min(target), i.max(target));
                rows[lo] = (rows[lo].0, rows[hi].1);
                rows.remove(hi);
                i = lo;
            }
            _ => i += 1,
        }
    }
    rows
}
