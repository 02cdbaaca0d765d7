//! Recognizer
//!
//! The recognizer owns the reference set and drives a scan: it converts a
//! copy of the page to gray, filters it, runs the [`DocumentSegmenter`]
//! and turns the segmentation events into text.
//!
//! - `begin_row` appends `'\n'`, except for the first row
//! - `process_char` ranks the cell and appends the best label; a cell with
//!   no candidate follows the [`UnmatchedPolicy`]
//! - `process_space` appends `' '`
//!
//! A failed scan returns the error and no partial text.

use glyphscan_core::{PixelBuffer, Rect};
use tracing::{debug, trace};

use super::ident::{candidate_labels, rank_cell};
use super::train::ReferenceSet;
use super::types::{BestMatches, CharacterRange, CharsetType, UnmatchedPolicy};
use crate::debug::{DebugSink, NoDebug};
use crate::error::RecogResult;
use crate::segment::{
    DocumentSegmenter, GlyphCell, ScanRegion, SegmentListener, SegmenterOptions,
};

/// Options fixed for the lifetime of a recognizer
#[derive(Debug, Clone)]
pub struct RecognizerOptions {
    /// Average the color channels when converting to gray (default: true)
    pub use_average_gray: bool,
    /// Output for cells no reference accepts (default: skip)
    pub unmatched: UnmatchedPolicy,
    /// Segmentation parameters
    pub segmenter: SegmenterOptions,
}

impl Default for RecognizerOptions {
    fn default() -> Self {
        Self {
            use_average_gray: true,
            unmatched: UnmatchedPolicy::Skip,
            segmenter: SegmenterOptions::default(),
        }
    }
}

impl RecognizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_use_average_gray(mut self, use_average: bool) -> Self {
        self.use_average_gray = use_average;
        self
    }

    pub fn with_unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn with_segmenter(mut self, segmenter: SegmenterOptions) -> Self {
        self.segmenter = segmenter;
        self
    }
}

/// Per-scan parameters
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Region to scan (default: whole image)
    pub region: ScanRegion,
    /// Labels allowed in the output; `None` allows every trained label
    pub acceptable: Option<Vec<CharacterRange>>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: ScanRegion) -> Self {
        self.region = region;
        self
    }

    /// Allow the labels in `range`, in addition to any already allowed
    pub fn with_range(mut self, range: CharacterRange) -> Self {
        self.acceptable.get_or_insert_with(Vec::new).push(range);
        self
    }

    /// Allow the labels of a predefined charset
    pub fn with_charset(mut self, charset: CharsetType) -> Self {
        self.acceptable
            .get_or_insert_with(Vec::new)
            .extend(charset.ranges());
        self
    }
}

/// Template-matching text recognizer.
///
/// A recognizer is not reentrant: scratch state for the output text and
/// the candidate ranking is reused and reset at the start of every scan.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    pub(crate) references: ReferenceSet,
    options: RecognizerOptions,
    segmenter: DocumentSegmenter,
    output: String,
    matches: BestMatches,
}

impl Recognizer {
    /// Create an untrained recognizer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::InvalidParameter`] for invalid
    /// segmenter options.
    pub fn new(options: RecognizerOptions) -> RecogResult<Self> {
        let segmenter = DocumentSegmenter::new(options.segmenter.clone())?;
        Ok(Self {
            references: ReferenceSet::new(),
            options,
            segmenter,
            output: String::new(),
            matches: BestMatches::new(),
        })
    }

    /// Create a recognizer around an existing reference set
    pub fn with_references(
        references: ReferenceSet,
        options: RecognizerOptions,
    ) -> RecogResult<Self> {
        let mut recognizer = Self::new(options)?;
        recognizer.references = references;
        Ok(recognizer)
    }

    pub fn options(&self) -> &RecognizerOptions {
        &self.options
    }

    pub fn reference_set(&self) -> &ReferenceSet {
        &self.references
    }

    /// Swap in a new reference set, returning the old one
    pub fn replace_reference_set(&mut self, references: ReferenceSet) -> ReferenceSet {
        std::mem::replace(&mut self.references, references)
    }

    /// Ranking of the last glyph cell of the most recent scan
    pub fn last_matches(&self) -> &BestMatches {
        &self.matches
    }

    /// Decode the text in `image`.
    ///
    /// The image must hold packed color samples; it is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::InvalidRegion`] if the scan region does
    /// not fit the image.
    pub fn scan(&mut self, image: &PixelBuffer, options: &ScanOptions) -> RecogResult<String> {
        self.scan_with_sink(image, options, &mut NoDebug)
    }

    /// Decode the text in `image`, reporting geometry to `sink`.
    pub fn scan_with_sink<S: DebugSink + ?Sized>(
        &mut self,
        image: &PixelBuffer,
        options: &ScanOptions,
        sink: &mut S,
    ) -> RecogResult<String> {
        self.output.clear();
        self.matches.clear();

        options.region.resolve(image.width(), image.height())?;

        let mut buffer = image.clone();
        buffer.to_gray_scale(self.options.use_average_gray);
        buffer.filter();

        let labels = candidate_labels(&self.references, options.acceptable.as_deref());
        let mut session = ScanSession {
            references: &self.references,
            labels: &labels,
            unmatched: self.options.unmatched,
            output: &mut self.output,
            matches: &mut self.matches,
            sink,
            first_row: true,
            matched: 0,
            unmatched_cells: 0,
        };
        let result = self.segmenter.scan(&buffer, &options.region, &mut session);
        let (matched, unmatched_cells) = (session.matched, session.unmatched_cells);

        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                self.output.clear();
                return Err(e);
            }
        };
        debug!(
            rows = stats.rows,
            cells = stats.chars,
            spaces = stats.spaces,
            matched,
            unmatched = unmatched_cells,
            labels = labels.len(),
            "scan complete"
        );
        Ok(self.output.clone())
    }
}

/// Listener state for one scan
struct ScanSession<'a, S: ?Sized> {
    references: &'a ReferenceSet,
    labels: &'a [char],
    unmatched: UnmatchedPolicy,
    output: &'a mut String,
    matches: &'a mut BestMatches,
    sink: &'a mut S,
    first_row: bool,
    matched: usize,
    unmatched_cells: usize,
}

impl<S: DebugSink + ?Sized> SegmentListener for ScanSession<'_, S> {
    fn begin_row(&mut self, _buffer: &PixelBuffer, y1: u32, y2: u32) {
        if !self.first_row {
            self.output.push('\n');
        }
        self.first_row = false;
        self.sink.row(y1, y2);
    }

    fn process_char(&mut self, buffer: &PixelBuffer, cell: &GlyphCell) {
        rank_cell(self.references, self.labels, buffer, cell, self.matches);
        self.sink.char_cell(cell, self.matches.as_slice());

        if let Some(best) = self.matches.best() {
            trace!(label = ?best.label, score = best.score, bounds = ?cell.bounds, "matched cell");
            self.output.push(best.label);
            self.matched += 1;
            return;
        }
        trace!(bounds = ?cell.bounds, "unmatched cell");
        self.unmatched_cells += 1;
        if let UnmatchedPolicy::Placeholder(marker) = self.unmatched {
            self.output.push(marker);
        }
    }

    fn process_space(&mut self, _buffer: &PixelBuffer, space: &Rect) {
        self.output.push(' ');
        self.sink.space(space);
    }
}
