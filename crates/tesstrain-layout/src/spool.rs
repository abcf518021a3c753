// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Temporary on-disk storage for single-page images awaiting the merge.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tesstrain_core::error::{Result, TrainerError};
use tracing::debug;

use crate::page::{Page, PageSink};

/// File-name prefix of every spooled page image.
const PAGE_PREFIX: &str = "page";

/// Writes each flushed page to `page{N}.tif` inside a private temporary
/// directory. The directory and its pages are removed on [`PageSpool::close`]
/// or when the spool is dropped.
pub struct PageSpool {
    dir: TempDir,
    pages: Vec<PathBuf>,
}

impl PageSpool {
    /// Create a spool directory inside `parent`.
    pub fn new_in(parent: impl AsRef<Path>) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("pages-")
            .tempdir_in(parent.as_ref())?;
        Ok(Self {
            dir,
            pages: Vec::new(),
        })
    }

    /// Spooled page files in page order.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    /// Directory holding the spooled pages.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete every spooled page.
    pub fn close(self) -> Result<()> {
        debug!(pages = self.pages.len(), "Removing spooled page images");
        self.dir.close()?;
        Ok(())
    }
}

impl PageSink for PageSpool {
    fn flush(&mut self, page: Page) -> Result<()> {
        let path = self
            .dir
            .path()
            .join(format!("{PAGE_PREFIX}{}.tif", page.index()));
        page.canvas().save(&path).map_err(|err| {
            TrainerError::Image(format!("failed to save page to {}: {}", path.display(), err))
        })?;
        debug!(path = %path.display(), "Page image spooled");
        self.pages.push(path);
        Ok(())
    }
}
