// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multi-page TIFF assembly from spooled single-page images.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tesstrain_core::error::{Result, TrainerError};
use tiff::encoder::{TiffEncoder, colortype};
use tracing::{info, instrument};

/// Merges an ordered list of page images into one multi-page image.
pub trait PageMerger {
    fn merge(&self, pages: &[PathBuf], output: &Path) -> Result<()>;
}

/// Encodes the pages as 8-bit grayscale directories of a single TIFF file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffPageMerger;

impl PageMerger for TiffPageMerger {
    #[instrument(skip_all, fields(pages = pages.len(), output = %output.display()))]
    fn merge(&self, pages: &[PathBuf], output: &Path) -> Result<()> {
        if pages.is_empty() {
            return Err(TrainerError::Image("no page images to merge".into()));
        }

        let file = BufWriter::new(File::create(output)?);
        let mut encoder = TiffEncoder::new(file).map_err(tiff_err)?;
        for page in pages {
            let gray = image::open(page)
                .map_err(|err| {
                    TrainerError::Image(format!("failed to open {}: {}", page.display(), err))
                })?
                .to_luma8();
            encoder
                .write_image::<colortype::Gray8>(gray.width(), gray.height(), gray.as_raw())
                .map_err(tiff_err)?;
        }

        info!("Multi-page TIFF written");
        Ok(())
    }
}

fn tiff_err(err: tiff::TiffError) -> TrainerError {
    TrainerError::Image(format!("TIFF encoding failed: {err}"))
}
