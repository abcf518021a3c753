// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tesstrain-layout: Synthetic training pages for tesstrain.
//
// Flows training text across fixed-size grayscale pages (glyph measurement and
// drawing, word wrap, pagination), records the box of every drawn character in
// Tesseract's bottom-left-origin frame, writes `.box` files, and merges the
// spooled pages into a multi-page TIFF.

pub mod boxfile;
pub mod coords;
pub mod engine;
pub mod merge;
pub mod page;
pub mod render;
pub mod spool;

// Re-export the primary types so callers can use `tesstrain_layout::PageLayoutEngine` etc.
pub use boxfile::{BoxAnnotation, write_box_file};
pub use coords::to_box_space;
pub use engine::{LayoutSummary, PageLayoutEngine};
pub use merge::{PageMerger, TiffPageMerger};
pub use page::{Page, PageSink};
pub use render::{FixedCellRenderer, FontRenderer, PageRenderer};
pub use spool::PageSpool;
