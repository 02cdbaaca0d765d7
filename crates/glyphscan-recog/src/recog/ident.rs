//! Character identification
//!
//! Brute-force nearest-neighbour matching of one glyph cell against the
//! reference set. Every reference glyph that survives the shape pre-filter
//! is compared pixel by pixel; a label scores the minimum error of its
//! surviving glyphs, and labels are ranked in a [`BestMatches`].

use std::collections::BTreeSet;

use glyphscan_core::PixelBuffer;

use super::recognizer::Recognizer;
use super::train::ReferenceSet;
use super::types::{BestMatches, CharacterRange};
use crate::segment::GlyphCell;

/// Labels to consider for matching.
///
/// Without ranges, every label with glyphs. With ranges, the union of the
/// labels with glyphs inside any range, deduplicated, in range order.
pub(crate) fn candidate_labels(
    references: &ReferenceSet,
    acceptable: Option<&[CharacterRange]>,
) -> Vec<char> {
    match acceptable {
        None => references.labels().collect(),
        Some(ranges) => {
            let mut seen = BTreeSet::new();
            ranges
                .iter()
                .flat_map(|range| references.labels_in(range))
                .filter(|&label| seen.insert(label))
                .collect()
        }
    }
}

/// Rank `labels` for `cell`, replacing the contents of `best`.
pub(crate) fn rank_cell(
    references: &ReferenceSet,
    labels: &[char],
    buffer: &PixelBuffer,
    cell: &GlyphCell,
    best: &mut BestMatches,
) {
    best.clear();

    let aspect_ratio = cell.aspect_ratio();
    let top = cell.top_white_space_fraction();
    let bottom = cell.bottom_white_space_fraction();
    let (width, height) = (cell.bounds.width(), cell.bounds.height());

    for &label in labels {
        let score = references
            .glyphs(label)
            .iter()
            .filter(|g| g.is_candidate(aspect_ratio, width, height, top, bottom))
            .map(|g| g.distance_to(buffer, &cell.bounds))
            .reduce(f64::min);
        if let Some(score) = score {
            best.insert(label, score);
        }
    }
}

impl Recognizer {
    /// Rank the reference labels for one glyph cell of a filtered buffer.
    ///
    /// `acceptable` restricts the labels considered; `None` considers every
    /// trained label.
    pub fn identify_cell(
        &self,
        buffer: &PixelBuffer,
        cell: &GlyphCell,
        acceptable: Option<&[CharacterRange]>,
    ) -> BestMatches {
        let labels = candidate_labels(&self.references, acceptable);
        let mut best = BestMatches::new();
        rank_cell(&self.references, &labels, buffer, cell, &mut best);
        best
    }
}
