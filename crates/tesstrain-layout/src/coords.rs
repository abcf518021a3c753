// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinate mapping between the raster frame and the box-file frame.

/// Convert a top-left-origin pixel coordinate into the bottom-left-origin
/// frame used by Tesseract box files.
///
/// `page_height` must be the height of the page the point was rendered on.
/// The mapping is its own inverse.
pub fn to_box_space(x: i32, y: i32, page_height: i32) -> (i32, i32) {
    (x, page_height - y)
}
