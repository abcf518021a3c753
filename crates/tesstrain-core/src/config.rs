// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Training configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{MergerKind, PageGeometry};

/// Default location of the system `tessdata` directory.
pub const DEFAULT_TESSDATA_PATH: &str = "/usr/share/tessdata";

/// Settings with a sensible default. Passed explicitly into each session so
/// that several sessions can run in one process with independent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingOptions {
    /// Font size in pixels used when rendering the training pages.
    pub font_size: u32,
    /// Experience number, part of every generated file name.
    pub exp_number: u32,
    /// Directory holding installed `.traineddata` bundles.
    pub tessdata_path: PathBuf,
    /// Frequent-word list. Enables the dictionary-data stage when set.
    pub word_list: Option<PathBuf>,
    /// Echo the output of every external tool.
    pub verbose: bool,
    /// Size of the generated pages and position of the first glyph.
    pub page: PageGeometry,
    /// Upper bound on the runtime of any single external tool.
    pub tool_timeout_secs: u64,
    /// Page segmentation mode passed to `tesseract` in box-training mode.
    pub page_seg_mode: u8,
    /// Parent of the per-session working directories.
    pub work_root: PathBuf,
    /// How page images are merged into the multi-page TIFF.
    pub merger: MergerKind,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            font_size: 25,
            exp_number: 0,
            tessdata_path: PathBuf::from(DEFAULT_TESSDATA_PATH),
            word_list: None,
            verbose: true,
            page: PageGeometry::default(),
            tool_timeout_secs: 30 * 60,
            page_seg_mode: 5,
            work_root: PathBuf::from("."),
            merger: MergerKind::Native,
        }
    }
}

impl TrainingOptions {
    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

/// Everything needed to start one training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Name of the resulting dictionary (e.g. `eng`).
    pub dictionary_name: String,
    /// UTF-8 text rendered into the training pages.
    pub text_path: PathBuf,
    /// Font name as registered in the font properties file.
    pub font_name: String,
    /// TrueType/OpenType file of the training font.
    pub font_path: PathBuf,
    /// Path to the `font_properties` registry.
    pub font_properties: PathBuf,
    #[serde(flatten)]
    pub options: TrainingOptions,
}

impl TrainingConfig {
    pub fn new(
        dictionary_name: impl Into<String>,
        text_path: impl Into<PathBuf>,
        font_name: impl Into<String>,
        font_path: impl Into<PathBuf>,
        font_properties: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dictionary_name: dictionary_name.into(),
            text_path: text_path.into(),
            font_name: font_name.into(),
            font_path: font_path.into(),
            font_properties: font_properties.into(),
            options: TrainingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TrainingOptions) -> Self {
        self.options = options;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }
}
