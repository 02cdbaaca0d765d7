//! glyphscan - Template-matching OCR for Rust
//!
//! glyphscan decodes text from page images by splitting the page into rows
//! and glyph cells and matching every cell against labeled reference
//! glyphs.
//!
//! # Overview
//!
//! - Image loading (PNG, JPEG, TIFF, BMP, GIF, WebP, PNM) via [`io`]
//! - Grayscale conversion, binarization and despeckling on [`PixelBuffer`]
//! - Row, cell and word-space segmentation
//! - Training from labeled bitmaps and nearest-neighbour recognition
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use glyphscan::{GlyphBitmap, PixelBuffer, Rect, Recognizer, ScanOptions, color};
//!
//! let mut recognizer = Recognizer::default();
//! let bar = GlyphBitmap::filled(3, 8, 0).unwrap();
//! recognizer.train(&BTreeMap::from([('I', vec![bar])]), true).unwrap();
//!
//! let mut page = PixelBuffer::new_filled(30, 20, color::compose_gray(255)).unwrap();
//! page.fill_rect(&Rect::new(4, 6, 7, 14), color::compose_gray(0));
//! page.fill_rect(&Rect::new(20, 6, 23, 14), color::compose_gray(0));
//!
//! let text = recognizer.scan(&page, &ScanOptions::default()).unwrap();
//! assert_eq!(text, "I I");
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphscan_io as io;
pub use glyphscan_recog as recog;

pub use glyphscan_recog::{
    CharacterRange, CharsetType, RecogError, RecogResult, Recognizer, RecognizerOptions,
    ReferenceGlyph, ReferenceSet, ScanOptions, ScanRegion, UnmatchedPolicy,
};
