//! Character recognition module
//!
//! This module provides template-based character recognition.
//!
//! # Overview
//!
//! The recognizer works by:
//! 1. Training on labeled glyph bitmaps to build [`ReferenceGlyph`]s
//! 2. Segmenting a page into rows and glyph cells
//! 3. Pre-filtering references by shape and ranking the survivors by mean
//!    squared pixel error
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use glyphscan_core::{GlyphBitmap, PixelBuffer, Rect, color::compose_gray};
//! use glyphscan_recog::recog::{Recognizer, ScanOptions};
//!
//! // A 3x8 bar trained as 'I'
//! let bar = GlyphBitmap::filled(3, 8, 0).unwrap();
//! let mut recognizer = Recognizer::default();
//! recognizer.train(&BTreeMap::from([('I', vec![bar])]), false).unwrap();
//!
//! let mut page = PixelBuffer::new_filled(20, 20, compose_gray(255)).unwrap();
//! page.fill_rect(&Rect::new(5, 5, 8, 13), compose_gray(0));
//! assert_eq!(recognizer.scan(&page, &ScanOptions::default()).unwrap(), "I");
//! ```

mod glyph;
mod ident;
mod recognizer;
mod train;
mod types;

pub use glyph::*;
pub use recognizer::*;
pub use train::*;
pub use types::*;
