//! Training
//!
//! Training turns labeled glyph bitmaps into [`ReferenceGlyph`]s and stores
//! them in a [`ReferenceSet`] keyed by character. Training is additive:
//! new glyphs for a label are appended after the existing ones, never
//! replacing them, unless the set is cleared first.

use std::collections::BTreeMap;

use glyphscan_core::GlyphBitmap;
use tracing::{debug, warn};

use super::glyph::ReferenceGlyph;
use super::recognizer::Recognizer;
use super::types::CharacterRange;
use crate::error::RecogResult;

/// Reference glyphs grouped by label, iterated in label order.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    glyphs: BTreeMap<char, Vec<ReferenceGlyph>>,
}

impl ReferenceSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no label has any glyph
    pub fn is_empty(&self) -> bool {
        self.glyphs.values().all(Vec::is_empty)
    }

    /// Number of labels with at least one glyph
    pub fn label_count(&self) -> usize {
        self.glyphs.values().filter(|g| !g.is_empty()).count()
    }

    /// Total number of glyphs over all labels
    pub fn glyph_count(&self) -> usize {
        self.glyphs.values().map(Vec::len).sum()
    }

    /// Glyphs stored for `label`, in insertion order
    pub fn glyphs(&self, label: char) -> &[ReferenceGlyph] {
        self.glyphs.get(&label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Labels that have at least one glyph, ascending
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs
            .iter()
            .filter(|(_, g)| !g.is_empty())
            .map(|(&label, _)| label)
    }

    /// Labels within `range` that have at least one glyph, ascending
    pub fn labels_in(&self, range: &CharacterRange) -> impl Iterator<Item = char> + '_ {
        self.glyphs
            .range(range.min()..=range.max())
            .filter(|(_, g)| !g.is_empty())
            .map(|(&label, _)| label)
    }

    /// Appends one glyph under its own label
    pub fn push(&mut self, glyph: ReferenceGlyph) {
        self.glyphs.entry(glyph.label()).or_default().push(glyph);
    }

    /// Appends every glyph of `other`, label by label.
    ///
    /// Existing glyphs come first in the merged lists. Each glyph is filed
    /// under its own [`ReferenceGlyph::label`], whatever key it arrived
    /// under.
    pub fn merge(&mut self, other: BTreeMap<char, Vec<ReferenceGlyph>>) {
        for glyph in other.into_values().flatten() {
            self.push(glyph);
        }
    }

    /// Removes every glyph
    pub fn clear(&mut self) {
        self.glyphs.clear();
    }
}

impl Recognizer {
    /// Train the recognizer from labeled bitmaps.
    ///
    /// Each bitmap is filtered, cropped to its ink, and stored under its
    /// label. With `clean_before_train` the existing references are
    /// dropped first; otherwise the new glyphs are appended.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::NoContent`] if a bitmap holds no ink.
    /// Nothing is stored when an error is returned.
    pub fn train(
        &mut self,
        training: &BTreeMap<char, Vec<GlyphBitmap>>,
        clean_before_train: bool,
    ) -> RecogResult<()> {
        if training.is_empty() {
            warn!("training called with an empty batch");
        }
        let mut references: BTreeMap<char, Vec<ReferenceGlyph>> = BTreeMap::new();
        for (&label, bitmaps) in training {
            let glyphs = bitmaps
                .iter()
                .map(|bitmap| ReferenceGlyph::from_bitmap(label, bitmap))
                .collect::<RecogResult<Vec<_>>>()?;
            references.insert(label, glyphs);
        }
        if clean_before_train {
            self.references.clear();
        }
        let added: usize = references.values().map(Vec::len).sum();
        self.references.merge(references);
        debug!(
            added,
            labels = self.references.label_count(),
            total = self.references.glyph_count(),
            "trained reference glyphs"
        );
        Ok(())
    }

    /// Append prepared reference glyphs, grouped by label.
    pub fn add_training_glyphs(&mut self, glyphs: BTreeMap<char, Vec<ReferenceGlyph>>) {
        self.references.merge(glyphs);
    }

    /// Drop all training data
    pub fn clear_training(&mut self) {
        self.references.clear();
    }

    /// Labels the recognizer can currently emit
    pub fn trained_labels(&self) -> Vec<char> {
        self.references.labels().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(label: char, width: u32) -> ReferenceGlyph {
        ReferenceGlyph::new(label, width, 2, vec![0; (width * 2) as usize], 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_merge_appends() {
        let mut set = ReferenceSet::new();
        set.push(glyph('a', 1));
        set.merge(BTreeMap::from([('a', vec![glyph('a', 2)]), ('b', vec![glyph('b', 3)])]));

        let widths: Vec<u32> = set.glyphs('a').iter().map(|g| g.width()).collect();
        assert_eq!(widths, vec![1, 2]);
        assert_eq!(set.glyph_count(), 3);
        assert_eq!(set.labels().collect::<String>(), "ab");
    }

    #[test]
    fn test_merge_files_glyphs_by_own_label() {
        let mut set = ReferenceSet::new();
        set.merge(BTreeMap::from([('A', vec![glyph('B', 1), glyph('A', 2)])]));
        assert_eq!(set.labels().collect::<String>(), "AB");
        assert_eq!(set.glyphs('A').len(), 1);
        assert_eq!(set.glyphs('B').iter().map(|g| g.label()).collect::<String>(), "B");

        let mut recognizer = Recognizer::default();
        recognizer.add_training_glyphs(BTreeMap::from([('x', vec![glyph('y', 3)])]));
        assert_eq!(recognizer.trained_labels(), vec!['y']);
    }

    #[test]
    fn test_labels_in_range() {
        let mut set = ReferenceSet::new();
        for label in ['1', '7', 'A', 'x'] {
            set.push(glyph(label, 1));
        }
        let digits = CharacterRange::new('0', '9').unwrap();
        assert_eq!(set.labels_in(&digits).collect::<String>(), "17");
        let none = CharacterRange::new('B', 'Z').unwrap();
        assert_eq!(set.labels_in(&none).count(), 0);
    }

    #[test]
    fn test_clear_and_empty_labels() {
        let mut set = ReferenceSet::new();
        assert!(set.is_empty());
        set.merge(BTreeMap::from([('z', Vec::new())]));
        assert!(set.is_empty());
        assert_eq!(set.label_count(), 0);
        assert!(set.glyphs('z').is_empty());

        set.push(glyph('q', 1));
        assert!(!set.is_empty());
        set.clear();
        assert!(set.is_empty());
        assert!(set.glyphs('q').is_empty());
    }

    #[test]
    fn test_train_clean_and_append() {
        let mut bitmap = GlyphBitmap::filled(4, 6, 255).unwrap();
        for y in 0..6 {
            bitmap.set(1, y, 0).unwrap();
            bitmap.set(2, y, 0).unwrap();
        }
        let training = BTreeMap::from([('I', vec![bitmap.clone()])]);

        let mut recognizer = Recognizer::default();
        recognizer.train(&training, false).unwrap();
        recognizer.train(&training, false).unwrap();
        assert_eq!(recognizer.reference_set().glyphs('I').len(), 2);

        recognizer.train(&training, true).unwrap();
        assert_eq!(recognizer.reference_set().glyphs('I').len(), 1);
        assert_eq!(recognizer.trained_labels(), vec!['I']);

        recognizer.clear_training();
        assert!(recognizer.trained_labels().is_empty());
    }

    #[test]
    fn test_train_failure_keeps_references() {
        let mut good = GlyphBitmap::filled(3, 3, 255).unwrap();
        for x in 0..3 {
            good.set(x, 1, 0).unwrap();
        }
        let mut recognizer = Recognizer::default();
        recognizer
            .train(&BTreeMap::from([('-', vec![good])]), false)
            .unwrap();

        let blank = GlyphBitmap::filled(3, 3, 255).unwrap();
        assert!(
            recognizer
                .train(&BTreeMap::from([('x', vec![blank])]), true)
                .is_err()
        );
        assert_eq!(recognizer.trained_labels(), vec!['-']);
    }
}
