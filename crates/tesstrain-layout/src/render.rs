// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph measurement and drawing onto page canvases.
//
// `FontRenderer` rasterises a TrueType/OpenType font through `ab_glyph` and
// `imageproc`. `FixedCellRenderer` treats every glyph as a solid cell of a
// fixed size, which keeps layout geometry predictable in tests and benchmarks.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tesstrain_core::error::{Result, TrainerError};
use tracing::{info, instrument};

/// Ink colour for every glyph.
const INK: Luma<u8> = Luma([0u8]);

/// Measures and draws glyphs for the layout engine.
pub trait PageRenderer {
    /// Rendered `(width, height)` of `text` in pixels.
    fn measure(&self, text: &str) -> (u32, u32);

    /// Draw `glyph` with its top-left corner at `(x, y)`.
    fn draw(&self, canvas: &mut GrayImage, glyph: char, x: i32, y: i32);

    /// Rendered `(width, height)` of a single glyph.
    fn measure_glyph(&self, glyph: char) -> (u32, u32) {
        let mut buf = [0u8; 4];
        self.measure(glyph.encode_utf8(&mut buf))
    }
}

/// Renders glyphs from a font file at a fixed pixel size.
pub struct FontRenderer {
    font: FontVec,
    scale: PxScale,
}

impl FontRenderer {
    /// Load a font file and render it at `size_px` pixels.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), size_px = size_px))]
    pub fn from_file(path: impl AsRef<Path>, size_px: u32) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let font = FontVec::try_from_vec(data).map_err(|err| {
            TrainerError::Font(format!("{}: {}", path.as_ref().display(), err))
        })?;
        info!("Font loaded");
        Ok(Self::with_font(font, size_px))
    }

    /// Parse font data already held in memory.
    pub fn from_bytes(data: Vec<u8>, size_px: u32) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|err| TrainerError::Font(format!("invalid font data: {err}")))?;
        Ok(Self::with_font(font, size_px))
    }

    fn with_font(font: FontVec, size_px: u32) -> Self {
        Self {
            font,
            scale: PxScale::from(size_px as f32),
        }
    }
}

impl PageRenderer for FontRenderer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let scaled = self.font.as_scaled(self.scale);
        let width: f32 = text
            .chars()
            .map(|ch| scaled.h_advance(scaled.glyph_id(ch)))
            .sum();
        (width.ceil() as u32, scaled.height().ceil() as u32)
    }

    fn draw(&self, canvas: &mut GrayImage, glyph: char, x: i32, y: i32) {
        if glyph.is_whitespace() {
            return;
        }
        let mut buf = [0u8; 4];
        draw_text_mut(
            canvas,
            INK,
            x,
            y,
            self.scale,
            &self.font,
            glyph.encode_utf8(&mut buf),
        );
    }
}

/// Treats every character as a `cell_width` x `cell_height` block.
#[derive(Debug, Clone, Copy)]
pub struct FixedCellRenderer {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl FixedCellRenderer {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl PageRenderer for FixedCellRenderer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let glyphs = text.chars().count() as u32;
        (glyphs * self.cell_width, self.cell_height)
    }

    fn draw(&self, canvas: &mut GrayImage, glyph: char, x: i32, y: i32) {
        if glyph.is_whitespace() || self.cell_width == 0 || self.cell_height == 0 {
            return;
        }
        let cell = Rect::at(x, y).of_size(self.cell_width, self.cell_height);
        draw_filled_rect_mut(canvas, cell, INK);
    }
}
