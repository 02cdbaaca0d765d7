//! Type definitions for character recognition
//!
//! This module contains the small value types shared by training and
//! identification: character ranges, match candidates and the bounded
//! best-match ranking.

use crate::error::{RecogError, RecogResult};

/// Number of ranked candidates kept per glyph cell
pub const BEST_MATCH_CAPACITY: usize = 8;

/// An inclusive range of character labels.
///
/// Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterRange {
    min: char,
    max: char,
}

impl CharacterRange {
    /// Creates a range covering `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `min > max`.
    pub fn new(min: char, max: char) -> RecogResult<Self> {
        if min > max {
            return Err(RecogError::InvalidParameter(format!(
                "character range min {min:?} is greater than max {max:?}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Creates a range holding a single character.
    pub fn single(c: char) -> Self {
        Self { min: c, max: c }
    }

    /// Lowest character in the range
    pub fn min(&self) -> char {
        self.min
    }

    /// Highest character in the range
    pub fn max(&self) -> char {
        self.max
    }

    /// Returns true if `c` lies within the range
    pub fn contains(&self, c: char) -> bool {
        self.min <= c && c <= self.max
    }

    /// Iterates over every character in the range, in ascending order
    pub fn chars(&self) -> impl Iterator<Item = char> {
        (self.min as u32..=self.max as u32).filter_map(char::from_u32)
    }
}

/// Predefined character sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharsetType {
    /// Character set type is not specified
    #[default]
    Unknown,
    /// Arabic numerals: 0-9
    ArabicNumerals,
    /// Lowercase letters: a-z
    LcAlpha,
    /// Uppercase letters: A-Z
    UcAlpha,
    /// Digits plus upper and lower case letters
    Alphanumeric,
    /// Printable ASCII without the space: '!'-'~'
    PrintableAscii,
}

impl CharsetType {
    /// Returns the ranges making up this charset
    pub fn ranges(&self) -> Vec<CharacterRange> {
        let r = |min, max| CharacterRange { min, max };
        match self {
            CharsetType::Unknown => Vec::new(),
            CharsetType::ArabicNumerals => vec![r('0', '9')],
            CharsetType::LcAlpha => vec![r('a', 'z')],
            CharsetType::UcAlpha => vec![r('A', 'Z')],
            CharsetType::Alphanumeric => vec![r('0', '9'), r('A', 'Z'), r('a', 'z')],
            CharsetType::PrintableAscii => vec![r('!', '~')],
        }
    }

    /// Returns the expected number of characters in this charset
    pub fn expected_size(&self) -> usize {
        self.ranges().iter().map(|r| r.chars().count()).sum()
    }
}

/// One scored label for a glyph cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    /// Character label of the reference glyph
    pub label: char,
    /// Mean squared pixel error; lower is better
    pub score: f64,
}

/// What to emit for a glyph cell that no reference glyph accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Emit nothing for the cell (default)
    #[default]
    Skip,
    /// Emit the given marker character
    Placeholder(char),
}

/// Fixed-capacity ranking of match candidates.
///
/// Entries stay sorted ascending by score. Inserting into a full ranking
/// evicts the worst entry; a candidate no better than every entry of a full
/// ranking is dropped. Equal scores keep the earlier entry ahead.
#[derive(Debug, Clone)]
pub struct BestMatches {
    entries: [MatchCandidate; BEST_MATCH_CAPACITY],
    len: usize,
}

impl Default for BestMatches {
    fn default() -> Self {
        Self::new()
    }
}

impl BestMatches {
    /// Creates an empty ranking
    pub fn new() -> Self {
        Self {
            entries: [MatchCandidate {
                label: '\0',
                score: 0.0,
            }; BEST_MATCH_CAPACITY],
            len: 0,
        }
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the number of ranked entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been ranked
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the ranking holds [`BEST_MATCH_CAPACITY`] entries
    pub fn is_full(&self) -> bool {
        self.len == BEST_MATCH_CAPACITY
    }

    /// Returns the lowest-scoring entry
    pub fn best(&self) -> Option<&MatchCandidate> {
        self.as_slice().first()
    }

    /// Returns the ranked entries, best first
    pub fn as_slice(&self) -> &[MatchCandidate] {
        &self.entries[..self.len]
    }

    /// Inserts a candidate at its ranked position.
    ///
    /// Returns `true` if the candidate was kept.
    pub fn insert(&mut self, label: char, score: f64) -> bool {
        let candidate = MatchCandidate { label, score };
        match self.as_slice().iter().position(|e| score < e.score) {
            Some(i) => {
                let last = self.len.min(BEST_MATCH_CAPACITY - 1);
                self.entries.copy_within(i..last, i + 1);
                self.entries[i] = candidate;
                if self.len < BEST_MATCH_CAPACITY {
                    self.len += 1;
                }
                true
            }
            None if self.len < BEST_MATCH_CAPACITY => {
                self.entries[self.len] = candidate;
                self.len += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(best: &BestMatches) -> String {
        best.as_slice().iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_character_range_invariant() {
        assert!(CharacterRange::new('9', '0').is_err());
        let r = CharacterRange::new('0', '9').unwrap();
        assert_eq!(r.min(), '0');
        assert_eq!(r.max(), '9');
        assert!(r.contains('5'));
        assert!(!r.contains('A'));
        assert_eq!(r.chars().count(), 10);
    }

    #[test]
    fn test_character_range_single() {
        let r = CharacterRange::single('x');
        assert_eq!(r.chars().collect::<Vec<_>>(), vec!['x']);
    }

    #[test]
    fn test_character_range_skips_surrogates() {
        let r = CharacterRange::new('\u{d7ff}', '\u{e000}').unwrap();
        assert_eq!(r.chars().count(), 2);
    }

    #[test]
    fn test_charset_type_expected_size() {
        assert_eq!(CharsetType::Unknown.expected_size(), 0);
        assert_eq!(CharsetType::ArabicNumerals.expected_size(), 10);
        assert_eq!(CharsetType::LcAlpha.expected_size(), 26);
        assert_eq!(CharsetType::UcAlpha.expected_size(), 26);
        assert_eq!(CharsetType::Alphanumeric.expected_size(), 62);
        assert_eq!(CharsetType::PrintableAscii.expected_size(), 94);
    }

    #[test]
    fn test_best_matches_sorted_insert() {
        let mut best = BestMatches::new();
        assert!(best.is_empty());
        assert!(best.best().is_none());

        best.insert('c', 3.0);
        best.insert('a', 1.0);
        best.insert('b', 2.0);
        assert_eq!(labels(&best), "abc");
        assert_eq!(best.best().map(|c| c.label), Some('a'));
    }

    #[test]
    fn test_best_matches_ties_are_stable() {
        let mut best = BestMatches::new();
        best.insert('x', 1.0);
        best.insert('y', 1.0);
        best.insert('z', 0.5);
        best.insert('w', 1.0);
        assert_eq!(labels(&best), "zxyw");
    }

    #[test]
    fn test_best_matches_evicts_worst_when_full() {
        let mut best = BestMatches::new();
        for (i, label) in "abcdefgh".chars().enumerate() {
            assert!(best.insert(label, (i + 1) as f64));
        }
        assert!(best.is_full());

        // No better than the worst: dropped
        assert!(!best.insert('z', 8.0));
        assert_eq!(labels(&best), "abcdefgh");

        assert!(best.insert('z', 0.5));
        assert_eq!(best.len(), BEST_MATCH_CAPACITY);
        assert_eq!(labels(&best), "zabcdefg");
    }

    #[test]
    fn test_best_matches_clear() {
        let mut best = BestMatches::new();
        best.insert('a', 1.0);
        best.clear();
        assert!(best.is_empty());
        best.insert('b', 5.0);
        assert_eq!(labels(&best), "b");
    }
}
