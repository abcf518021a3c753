// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A single training page and the destinations pages are flushed to.

use image::{GrayImage, Luma};
use tesstrain_core::error::Result;

const PAPER: Luma<u8> = Luma([255u8]);

/// One fixed-size page: a white grayscale canvas plus the write cursor.
#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    canvas: GrayImage,
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Page {
    /// A blank page with the cursor at `(x, y)`.
    pub fn blank(index: usize, width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            index,
            canvas: GrayImage::from_pixel(width, height, PAPER),
            x,
            y,
        }
    }

    /// Zero-based position of the page in the sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current write position, top-left origin.
    pub fn cursor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn canvas(&self) -> &GrayImage {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut GrayImage {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> GrayImage {
        self.canvas
    }
}

/// Receives pages as the layout engine fills them, in index order.
pub trait PageSink {
    fn flush(&mut self, page: Page) -> Result<()>;
}

/// Keep every page in memory.
impl PageSink for Vec<Page> {
    fn flush(&mut self, page: Page) -> Result<()> {
        self.push(page);
        Ok(())
    }
}
