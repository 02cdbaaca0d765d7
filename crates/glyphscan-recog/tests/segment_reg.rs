//! Document segmentation regression test
//!
//! Runs the segmenter over filtered synthetic pages and checks the event
//! stream and its counts.
//!
//! Tests:
//!   1: rows, cells and spaces of a rendered two-line page
//!   2: event order on the same page
//!   3: short-row merging of a detached mark
//!   4: noise threshold, space width and row gap options
//!   5: a line holding only a dash stays its own row

use glyphscan_core::{INK, PAPER, PixelBuffer, Rect};
use glyphscan_recog::segment::{
    DocumentSegmenter, GlyphCell, ScanRegion, SegmentListener, SegmenterOptions,
};
use glyphscan_test::RegParams;
use glyphscan_test::font::render_page;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    BeginRow(u32, u32),
    Char(GlyphCell),
    Space,
    EndRow,
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl SegmentListener for Recorder {
    fn begin_row(&mut self, _: &PixelBuffer, y1: u32, y2: u32) {
        self.events.push(Event::BeginRow(y1, y2));
    }

    fn process_char(&mut self, _: &PixelBuffer, cell: &GlyphCell) {
        self.events.push(Event::Char(*cell));
    }

    fn process_space(&mut self, _: &PixelBuffer, _: &Rect) {
        self.events.push(Event::Space);
    }

    fn end_row(&mut self, _: &PixelBuffer) {
        self.events.push(Event::EndRow);
    }
}

fn filtered_page(text: &str, scale: u32) -> PixelBuffer {
    let mut page = render_page(text, scale).expect("render page");
    page.to_gray_scale(true);
    page.filter();
    page
}

/// Test 1: Counts on a rendered page
#[test]
fn segment_reg_counts() {
    let mut rp = RegParams::new("segment_counts");

    let page = filtered_page("HELLO WORLD\n2024", 2);
    let mut recorder = Recorder::default();
    let stats = DocumentSegmenter::default()
        .scan(&page, &ScanRegion::full(), &mut recorder)
        .expect("segment");

    rp.compare_values(2.0, stats.rows as f64, 0.0);
    rp.compare_values(14.0, stats.chars as f64, 0.0);
    rp.compare_values(1.0, stats.spaces as f64, 0.0);
    rp.compare_values(0.0, stats.noise_cells as f64, 0.0);
    rp.compare_values(
        (2 * stats.rows + stats.chars + stats.spaces) as f64,
        recorder.events.len() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "segment counts failed");
}

/// Test 2: Reading order
#[test]
fn segment_reg_order() {
    let mut rp = RegParams::new("segment_order");

    let page = filtered_page("A B\nC", 2);
    let mut recorder = Recorder::default();
    DocumentSegmenter::default()
        .scan(&page, &ScanRegion::full(), &mut recorder)
        .expect("segment");

    // Font rows 3..10 and 14..21 at scale 2
    let expected = vec![
        Event::BeginRow(6, 20),
        Event::Char(GlyphCell {
            bounds: Rect::new(6, 6, 16, 20),
            row_y1: 6,
            row_y2: 20,
        }),
        Event::Space,
        Event::Char(GlyphCell {
            bounds: Rect::new(30, 6, 40, 20),
            row_y1: 6,
            row_y2: 20,
        }),
        Event::EndRow,
        Event::BeginRow(28, 42),
        Event::Char(GlyphCell {
            bounds: Rect::new(6, 28, 16, 42),
            row_y1: 28,
            row_y2: 42,
        }),
        Event::EndRow,
    ];
    rp.compare_values(expected.len() as f64, recorder.events.len() as f64, 0.0);
    for (want, got) in expected.iter().zip(&recorder.events) {
        if want != got {
            eprintln!("expected {want:?}, got {got:?}");
            rp.compare_values(0.0, 1.0, 0.0);
        }
    }

    assert!(rp.cleanup(), "segment order failed");
}

/// Test 3: A short mark above a stem joins the stem's row
#[test]
fn segment_reg_short_rows() {
    let mut rp = RegParams::new("segment_short_rows");

    let mut page = PixelBuffer::new_filled(40, 40, PAPER).expect("page");
    page.fill_rect(&Rect::new(10, 4, 13, 7), INK);
    page.fill_rect(&Rect::new(10, 10, 13, 30), INK);
    page.fill_rect(&Rect::new(20, 12, 30, 30), INK);

    let mut merged = Recorder::default();
    let stats = DocumentSegmenter::default()
        .scan(&page, &ScanRegion::full(), &mut merged)
        .expect("segment");
    rp.compare_values(1.0, stats.rows as f64, 0.0);
    rp.compare_values(2.0, stats.chars as f64, 0.0);
    let first = merged.events.get(1).cloned();
    let want = Event::Char(GlyphCell {
        bounds: Rect::new(10, 4, 13, 30),
        row_y1: 4,
        row_y2: 30,
    });
    rp.compare_values(1.0, if first == Some(want) { 1.0 } else { 0.0 }, 0.0);

    let no_merge = SegmenterOptions::new().with_short_row_fraction(0.0);
    let mut split = Recorder::default();
    let stats = DocumentSegmenter::new(no_merge)
        .expect("segmenter")
        .scan(&page, &ScanRegion::full(), &mut split)
        .expect("segment");
    rp.compare_values(2.0, stats.rows as f64, 0.0);

    assert!(rp.cleanup(), "segment short rows failed");
}

/// Test 4: Option effects
#[test]
fn segment_reg_options() {
    let mut rp = RegParams::new("segment_options");

    // Two-pixel blob next to a glyph-sized block
    let mut page = PixelBuffer::new_filled(40, 30, PAPER).expect("page");
    page.fill_rect(&Rect::new(4, 5, 10, 15), INK);
    page.fill_rect(&Rect::new(13, 10, 15, 11), INK);

    let stats = DocumentSegmenter::default()
        .scan(&page, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(1.0, stats.chars as f64, 0.0);
    rp.compare_values(1.0, stats.noise_cells as f64, 0.0);

    let keep_all = SegmenterOptions::new().with_min_ink_pixels(1);
    let stats = DocumentSegmenter::new(keep_all)
        .expect("segmenter")
        .scan(&page, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(2.0, stats.chars as f64, 0.0);

    // Wider space threshold swallows the word gap
    let text = filtered_page("A B", 2);
    let wide = SegmenterOptions::new().with_space_width_fraction(2.0);
    let stats = DocumentSegmenter::new(wide)
        .expect("segmenter")
        .scan(&text, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(0.0, stats.spaces as f64, 0.0);

    // Larger row gap tolerance joins the two lines
    let lines = filtered_page("A\nB", 2);
    let tolerant = SegmenterOptions::new().with_min_row_gap(8);
    let stats = DocumentSegmenter::new(tolerant)
        .expect("segmenter")
        .scan(&lines, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(1.0, stats.rows as f64, 0.0);

    // Wider break requirement joins letters into one cell
    let word = filtered_page("AB", 2);
    let joined = SegmenterOptions::new().with_min_char_break(3);
    let stats = DocumentSegmenter::new(joined)
        .expect("segmenter")
        .scan(&word, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(1.0, stats.chars as f64, 0.0);

    assert!(rp.cleanup(), "segment options failed");
}

/// Test 5: Punctuation-only lines are not merged into the line above
#[test]
fn segment_reg_punctuation_lines() {
    let mut rp = RegParams::new("segment_punctuation_lines");

    // Dash sits on font row 3 of its line: 17 for line 1, 39 for line 3
    for (text, dash_y1) in [("A\n-", 34), ("A\n\n\n-", 78)] {
        let page = filtered_page(text, 2);
        let mut recorder = Recorder::default();
        let stats = DocumentSegmenter::default()
            .scan(&page, &ScanRegion::full(), &mut recorder)
            .expect("segment");
        rp.compare_values(2.0, stats.rows as f64, 0.0);
        rp.compare_values(2.0, stats.chars as f64, 0.0);

        let dash = Event::Char(GlyphCell {
            bounds: Rect::new(6, dash_y1, 16, dash_y1 + 2),
            row_y1: dash_y1,
            row_y2: dash_y1 + 2,
        });
        let found = recorder.events.contains(&Event::BeginRow(dash_y1, dash_y1 + 2))
            && recorder.events.contains(&dash);
        if !found {
            eprintln!("{text:?}: {:?}", recorder.events);
        }
        rp.compare_values(1.0, if found { 1.0 } else { 0.0 }, 0.0);
    }

    // A dash line above the text is kept apart as well
    let page = filtered_page("-\nA", 2);
    let stats = DocumentSegmenter::default()
        .scan(&page, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(2.0, stats.rows as f64, 0.0);

    // Doubling the gap limit still keeps the 14 px gap apart
    let tight = SegmenterOptions::new().with_max_merge_gap_fraction(0.5);
    let page = filtered_page("A\n-", 2);
    let stats = DocumentSegmenter::new(tight)
        .expect("segmenter")
        .scan(&page, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(2.0, stats.rows as f64, 0.0);

    // A limit wider than the gap folds the dash into the letter row
    let wide = SegmenterOptions::new().with_max_merge_gap_fraction(1.0);
    let stats = DocumentSegmenter::new(wide)
        .expect("segmenter")
        .scan(&page, &ScanRegion::full(), &mut Recorder::default())
        .expect("segment");
    rp.compare_values(1.0, stats.rows as f64, 0.0);

    assert!(rp.cleanup(), "segment punctuation lines failed");
}
