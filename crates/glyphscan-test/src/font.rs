//! Synthetic 5x7 test font
//!
//! Renders digits, upper case letters, `.` and `-` so tests can build
//! training bitmaps and whole pages without image files. Every letter and
//! digit spans all seven font rows, and no glyph has a blank column inside
//! its ink, so each rendered glyph is exactly one segmenter cell.
//!
//! Page layout, in font pixels: glyphs advance 6 (5 + 1 spacing), a space
//! advances 6, lines are 7 high with 4 blank lines between them, and the
//! page has a margin of 3 on every side.

use std::collections::BTreeMap;

use glyphscan_core::color::compose_gray;
use glyphscan_core::{GlyphBitmap, PixelBuffer, Rect};

use crate::error::{TestError, TestResult};

/// Glyph width in font pixels
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font pixels
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank font pixels between glyphs
pub const LETTER_SPACING: u32 = 1;
/// Blank font lines between text lines
pub const LINE_SPACING: u32 = 4;
/// Page margin in font pixels
pub const MARGIN: u32 = 3;

/// Every character the font can render
pub const FONT_CHARS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.-";

#[rustfmt::skip]
const GLYPHS: &[(char, [&str; 7])] = &[
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["###..", "#..#.", "#...#", "#...#", "#...#", "#..#.", "###.."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".###."]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('.', [".....", ".....", ".....", ".....", ".....", ".##..", ".##.."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
];

fn pattern(c: char) -> TestResult<&'static [&'static str; 7]> {
    GLYPHS
        .iter()
        .find(|(label, _)| *label == c)
        .map(|(_, rows)| rows)
        .ok_or(TestError::UnsupportedChar(c))
}

/// Ink pixels of `c` in font coordinates
fn ink_cells(c: char) -> TestResult<impl Iterator<Item = (u32, u32)>> {
    let rows = pattern(c)?;
    Ok(rows.iter().enumerate().flat_map(|(y, row)| {
        row.bytes()
            .enumerate()
            .filter(|&(_, b)| b == b'#')
            .map(move |(x, _)| (x as u32, y as u32))
    }))
}

/// Render one glyph as a training bitmap.
///
/// The frame is exactly one text line high (7 font rows) with one blank
/// font column on either side, so its white space fractions match a glyph
/// cut from a rendered page.
pub fn glyph_bitmap(c: char, scale: u32) -> TestResult<GlyphBitmap> {
    let scale = scale.max(1);
    let width = (GLYPH_WIDTH + 2) * scale;
    let height = GLYPH_HEIGHT * scale;
    let mut bitmap = GlyphBitmap::filled(width, height, 255)?;
    for (fx, fy) in ink_cells(c)? {
        for y in fy * scale..(fy + 1) * scale {
            for x in (fx + 1) * scale..(fx + 2) * scale {
                bitmap.set(x, y, 0)?;
            }
        }
    }
    Ok(bitmap)
}

/// One training bitmap per character of `chars`.
pub fn training_set(chars: &str, scale: u32) -> TestResult<BTreeMap<char, Vec<GlyphBitmap>>> {
    let mut set: BTreeMap<char, Vec<GlyphBitmap>> = BTreeMap::new();
    for c in chars.chars() {
        set.entry(c).or_default().push(glyph_bitmap(c, scale)?);
    }
    Ok(set)
}

/// Size in pixels of the page `render_page` produces for `text`
pub fn page_size(text: &str, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    let lines: Vec<&str> = text.split('\n').collect();
    let advance = GLYPH_WIDTH + LETTER_SPACING;
    let longest = lines
        .iter()
        .map(|l| l.chars().count() as u32)
        .max()
        .unwrap_or(0);
    let line_width = (longest * advance).saturating_sub(LETTER_SPACING);
    let n = lines.len() as u32;
    let text_height = n * GLYPH_HEIGHT + n.saturating_sub(1) * LINE_SPACING;
    (
        (line_width + 2 * MARGIN) * scale,
        (text_height + 2 * MARGIN) * scale,
    )
}

/// Render `text` as a black-on-white page of packed color samples.
///
/// `'\n'` starts a new line and `' '` leaves one glyph advance blank. An
/// empty line still takes up vertical space but produces no ink.
pub fn render_page(text: &str, scale: u32) -> TestResult<PixelBuffer> {
    let scale = scale.max(1);
    let (width, height) = page_size(text, scale);
    let mut page = PixelBuffer::new_filled(width, height, compose_gray(255))?;
    let ink = compose_gray(0);

    for (line_no, line) in text.split('\n').enumerate() {
        let top = MARGIN + line_no as u32 * (GLYPH_HEIGHT + LINE_SPACING);
        for (col, c) in line.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            let left = MARGIN + col as u32 * (GLYPH_WIDTH + LETTER_SPACING);
            for (fx, fy) in ink_cells(c)? {
                let x = (left + fx) * scale;
                let y = (top + fy) * scale;
                page.fill_rect(&Rect::new(x, y, x + scale, y + scale), ink);
            }
        }
    }
    Ok(page)
}
