// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout engine: flows a text stream across fixed-size pages and
// records the box of every character it draws.
//
// Words are placed left to right and lines top to bottom. A word that does
// not fit on the current line moves to the next one; when the next line would
// leave less than two line heights before the bottom edge, the page is flushed
// and a fresh page starts at the initial cursor.

use tesstrain_core::PageGeometry;
use tesstrain_core::error::{Result, TrainerError};
use tracing::{debug, info, instrument, warn};

use crate::boxfile::BoxAnnotation;
use crate::page::{Page, PageSink};
use crate::render::PageRenderer;

/// Outcome of laying out one text.
#[derive(Debug, Clone, Default)]
pub struct LayoutSummary {
    /// One annotation per non-whitespace character, in emission order.
    pub boxes: Vec<BoxAnnotation>,
    /// Number of pages flushed to the sink.
    pub page_count: usize,
    /// Words wider than the line they were placed on.
    pub overflowing_words: usize,
}

/// Lays out text on pages of a fixed geometry.
#[derive(Debug, Clone, Copy)]
pub struct PageLayoutEngine {
    geometry: PageGeometry,
}

/// Page geometry converted to the signed drawing frame.
#[derive(Clone, Copy)]
struct Frame {
    width: i32,
    height: i32,
    start_x: i32,
    start_y: i32,
}

impl PageLayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Lay out `text` with `renderer`, flushing every finished page to `sink`.
    ///
    /// At least one page is always flushed, even for empty text. A single
    /// word wider than the page is never split: it is drawn past the right
    /// margin and counted in [`LayoutSummary::overflowing_words`].
    #[instrument(skip_all, fields(text_len = text.len(), width = self.geometry.width, height = self.geometry.height))]
    pub fn layout<R, S>(&self, text: &str, renderer: &R, sink: &mut S) -> Result<LayoutSummary>
    where
        R: PageRenderer + ?Sized,
        S: PageSink + ?Sized,
    {
        let frame = self.frame()?;
        let mut summary = LayoutSummary::default();
        let mut page = self.blank_page(0);
        let mut word = String::new();

        for token in text.split_whitespace() {
            word.clear();
            word.push_str(token);
            word.push(' ');

            let (word_w, word_h) = renderer.measure(&word);
            let (word_w, line_h) = (word_w as i32, word_h as i32);

            if !word_fits_in_line(frame.width, page.x, word_w) {
                if newline_fits_in_page(frame.height, page.y, line_h) {
                    page.x = frame.start_x;
                    page.y += line_h;
                } else {
                    let next = self.blank_page(page.index() + 1);
                    let full = std::mem::replace(&mut page, next);
                    debug!(page = full.index(), "Page full");
                    summary.page_count += 1;
                    sink.flush(full)?;
                }
            }

            if page.x + word_w > frame.width {
                warn!(word = token, width = word_w, page = page.index(), "Word wider than the page; drawn past the margin");
                summary.overflowing_words += 1;
            }

            for ch in word.chars() {
                let (glyph_w, glyph_h) = renderer.measure_glyph(ch);
                let (glyph_w, glyph_h) = (glyph_w as i32, glyph_h as i32);
                if !ch.is_whitespace() {
                    summary.boxes.push(BoxAnnotation::from_raster(
                        ch,
                        (page.x, page.y),
                        (page.x + glyph_w, page.y + glyph_h),
                        page.index(),
                        frame.height,
                    ));
                }
                let (x, y) = page.cursor();
                renderer.draw(page.canvas_mut(), ch, x, y);
                page.x += glyph_w;
            }
        }

        summary.page_count += 1;
        sink.flush(page)?;

        info!(
            pages = summary.page_count,
            boxes = summary.boxes.len(),
            "Layout complete"
        );
        Ok(summary)
    }

    fn blank_page(&self, index: usize) -> Page {
        let g = self.geometry;
        Page::blank(index, g.width, g.height, g.start_x as i32, g.start_y as i32)
    }

    fn frame(&self) -> Result<Frame> {
        let g = self.geometry;
        let signed = |value: u32| {
            i32::try_from(value).map_err(|_| {
                TrainerError::InvalidConfig(format!("page dimension {value} is too large"))
            })
        };
        Ok(Frame {
            width: signed(g.width)?,
            height: signed(g.height)?,
            start_x: signed(g.start_x)?,
            start_y: signed(g.start_y)?,
        })
    }
}

/// Whether a word of width `word_w` fits between the cursor and the right edge.
fn word_fits_in_line(page_width: i32, x: i32, word_w: i32) -> bool {
    page_width - x - word_w > 0
}

/// Whether a new line still leaves two line heights above the bottom edge.
fn newline_fits_in_page(page_height: i32, y: i32, line_h: i32) -> bool {
    page_height - y - 2 * line_h > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FixedCellRenderer;

    fn engine(width: u32, height: u32) -> PageLayoutEngine {
        PageLayoutEngine::new(PageGeometry {
            width,
            height,
            start_x: 20,
            start_y: 20,
        })
    }

    fn non_whitespace(text: &str) -> usize {
        text.chars().filter(|c| !c.is_whitespace()).count()
    }

    #[test]
    fn two_words_on_one_page() {
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(1000, 1000)
            .layout("AB CD", &FixedCellRenderer::new(28, 28), &mut pages)
            .expect("layout");

        assert_eq!(pages.len(), 1);
        assert_eq!(summary.page_count, 1);
        let chars: String = summary.boxes.iter().map(|b| b.character).collect();
        assert_eq!(chars, "ABCD");

        let xs: Vec<i32> = summary.boxes.iter().map(|b| b.x0).collect();
        assert_eq!(xs, vec![20, 48, 104, 132]);
        for b in &summary.boxes {
            assert_eq!(b.page, 0);
            assert_eq!(b.width(), 28);
            assert_eq!(b.height(), 28);
            assert_eq!(b.y1, 1000 - 20);
            assert_eq!(b.y0, 1000 - 48);
        }
    }

    #[test]
    fn words_wrap_to_next_line() {
        // Width 200: "AAAA " is 140 px, so the second word starts a new line.
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(200, 1000)
            .layout("AAAA BBBB", &FixedCellRenderer::new(28, 28), &mut pages)
            .expect("layout");

        let first_b = summary
            .boxes
            .iter()
            .find(|b| b.character == 'B')
            .expect("B emitted");
        assert_eq!(first_b.x0, 20);
        assert_eq!(first_b.y1, 1000 - 48);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn full_page_starts_a_new_one() {
        // Height 100: from y=20 a second line needs 100 - 20 - 56 > 0, which
        // holds once; the third line overflows to page 1.
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(200, 100)
            .layout("AAAA BBBB CCCC", &FixedCellRenderer::new(28, 28), &mut pages)
            .expect("layout");

        assert_eq!(pages.len(), 2);
        assert_eq!(summary.page_count, 2);
        let c = summary
            .boxes
            .iter()
            .find(|b| b.character == 'C')
            .expect("C emitted");
        assert_eq!(c.page, 1);
        assert_eq!((c.x0, c.y1), (20, 100 - 20));
        assert_eq!(pages[0].index(), 0);
        assert_eq!(pages[1].index(), 1);
    }

    #[test]
    fn one_box_per_visible_character() {
        let text = "Lorem ipsum dolor sit amet,\nconsectetur   adipiscing\telit. 42!";
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(300, 120)
            .layout(text, &FixedCellRenderer::new(10, 14), &mut pages)
            .expect("layout");
        assert_eq!(summary.boxes.len(), non_whitespace(text));
    }

    #[test]
    fn page_indices_start_at_zero_and_never_decrease() {
        let text = "word ".repeat(400);
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(400, 200)
            .layout(&text, &FixedCellRenderer::new(12, 16), &mut pages)
            .expect("layout");

        assert_eq!(summary.boxes.first().map(|b| b.page), Some(0));
        assert!(summary.boxes.windows(2).all(|w| w[0].page <= w[1].page));
        assert_eq!(
            summary.boxes.last().map(|b| b.page + 1),
            Some(summary.page_count)
        );
        assert_eq!(pages.len(), summary.page_count);
    }

    #[test]
    fn boxes_stay_inside_the_page() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(50);
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(500, 300)
            .layout(&text, &FixedCellRenderer::new(11, 18), &mut pages)
            .expect("layout");

        assert_eq!(summary.overflowing_words, 0);
        for b in &summary.boxes {
            assert!(b.x1 <= 500, "{b} exceeds page width");
            assert!(b.y0 >= 0, "{b} exceeds page height");
        }
    }

    #[test]
    fn overwide_word_is_drawn_unsplit() {
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(100, 1000)
            .layout("ABCDEFGHIJ", &FixedCellRenderer::new(28, 28), &mut pages)
            .expect("layout");

        assert_eq!(summary.overflowing_words, 1);
        assert_eq!(summary.boxes.len(), 10);
        assert!(summary.boxes.iter().all(|b| b.y0 == summary.boxes[0].y0));
        assert!(summary.boxes.last().expect("boxes").x1 > 100);
    }

    #[test]
    fn empty_text_still_flushes_one_page() {
        let mut pages: Vec<Page> = Vec::new();
        let summary = engine(100, 100)
            .layout("   \n ", &FixedCellRenderer::new(8, 8), &mut pages)
            .expect("layout");
        assert!(summary.boxes.is_empty());
        assert_eq!(pages.len(), 1);
        assert_eq!(summary.page_count, 1);
    }

    #[test]
    fn glyphs_are_drawn_at_the_cursor() {
        let mut pages: Vec<Page> = Vec::new();
        engine(1000, 1000)
            .layout("A", &FixedCellRenderer::new(28, 28), &mut pages)
            .expect("layout");
        let canvas = pages[0].canvas();
        assert_eq!(canvas.get_pixel(20, 20).0[0], 0);
        assert_eq!(canvas.get_pixel(47, 47).0[0], 0);
        assert_eq!(canvas.get_pixel(48, 20).0[0], 255);
    }

    #[test]
    fn wrap_predicates_use_strict_margins() {
        assert!(word_fits_in_line(100, 20, 79));
        assert!(!word_fits_in_line(100, 20, 80));
        assert!(newline_fits_in_page(100, 20, 39));
        assert!(!newline_fits_in_page(100, 20, 40));
    }
}
