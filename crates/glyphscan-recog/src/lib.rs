//! glyphscan-recog - template-matching text recognition
//!
//! This crate turns a page image into text:
//!
//! - **Segmentation**: Split a binarized page into rows, glyph cells and
//!   word spaces
//! - **Training**: Build labeled reference glyphs from bitmaps
//! - **Recognition**: Match each glyph cell against the references and
//!   assemble the decoded text
//!
//! # Quick Start
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use glyphscan_core::PixelBuffer;
//! use glyphscan_recog::{CharsetType, Recognizer, ScanOptions};
//!
//! let mut recognizer = Recognizer::default();
//! // recognizer.train(&training_bitmaps, true).unwrap();
//!
//! let page = PixelBuffer::new(800, 600).unwrap();
//! let opts = ScanOptions::new().with_charset(CharsetType::ArabicNumerals);
//! let text = recognizer.scan(&page, &opts).unwrap();
//! println!("{text}");
//! ```
//!
//! # Modules
//!
//! - [`segment`]: Row, cell and space detection
//! - [`recog`]: Reference glyphs, training and matching
//! - [`debug`]: Scan geometry observers

pub mod debug;
mod error;
pub mod recog;
pub mod segment;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use debug::{BoxOverlay, DebugSink, NoDebug};
pub use recog::{
    BestMatches, CharacterRange, CharsetType, MatchCandidate, Recognizer, RecognizerOptions,
    ReferenceGlyph, ReferenceSet, ScanOptions, UnmatchedPolicy,
};
pub use segment::{
    DocumentSegmenter, GlyphCell, ScanRegion, SegmentListener, SegmentStats, SegmenterOptions,
};

// Re-export core for convenience
pub use glyphscan_core;
