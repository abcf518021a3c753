// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Box annotations and the `.box` file format.
//
// One line per non-whitespace character:
//   <char> <left> <bottom> <right> <top> <page>
// with coordinates in the bottom-left-origin frame of the page.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tesstrain_core::error::Result;
use tracing::{debug, instrument};

use crate::coords::to_box_space;

/// Bounding box of one emitted character, in box-file coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxAnnotation {
    pub character: char,
    /// Left edge.
    pub x0: i32,
    /// Bottom edge.
    pub y0: i32,
    /// Right edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Zero-based index of the page the character was drawn on.
    pub page: usize,
}

impl BoxAnnotation {
    /// Build an annotation from a glyph box given in raster coordinates
    /// (top-left corner `(left, top)`, bottom-right corner `(right, bottom)`).
    pub fn from_raster(
        character: char,
        (left, top): (i32, i32),
        (right, bottom): (i32, i32),
        page: usize,
        page_height: i32,
    ) -> Self {
        let (x0, y1) = to_box_space(left, top, page_height);
        let (x1, y0) = to_box_space(right, bottom, page_height);
        Self {
            character,
            x0,
            y0,
            x1,
            y1,
            page,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

impl fmt::Display for BoxAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.character, self.x0, self.y0, self.x1, self.y1, self.page
        )
    }
}

/// Write `boxes` to `path`, one line per annotation, in emission order.
#[instrument(skip_all, fields(path = %path.as_ref().display(), lines = boxes.len()))]
pub fn write_box_file(path: impl AsRef<Path>, boxes: &[BoxAnnotation]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    for annotation in boxes {
        writeln!(out, "{annotation}")?;
    }
    out.flush()?;
    debug!("Box file written");
    Ok(())
}
