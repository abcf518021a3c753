// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: page geometry, training artifacts and their names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size of every generated page and the position of its first glyph, in pixels.
///
/// Coordinates are top-left origin, the natural frame for left-to-right,
/// top-to-bottom placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub start_x: u32,
    pub start_y: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 3500,
            height: 1024,
            start_x: 20,
            start_y: 20,
        }
    }
}

/// How single-page images are combined into the multi-page training image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergerKind {
    /// Encode a multi-page TIFF in-process.
    #[default]
    Native,
    /// Delegate to ImageMagick's `convert`.
    ImageMagick,
}

/// Files written under a fixed name by the clustering and normalisation tools.
///
/// These must be renamed into the dictionary namespace before
/// `combine_tessdata` can pick them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedArtifact {
    Unicharset,
    Pffmtable,
    Microfeat,
    Inttemp,
    Normproto,
}

impl FixedArtifact {
    /// Every artifact renamed by the rename stage, in rename order.
    pub const ALL: [FixedArtifact; 5] = [
        FixedArtifact::Unicharset,
        FixedArtifact::Pffmtable,
        FixedArtifact::Microfeat,
        FixedArtifact::Inttemp,
        FixedArtifact::Normproto,
    ];

    /// The file name the external tool writes.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Unicharset => "unicharset",
            Self::Pffmtable => "pffmtable",
            Self::Microfeat => "Microfeat",
            Self::Inttemp => "inttemp",
            Self::Normproto => "normproto",
        }
    }
}

impl fmt::Display for FixedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Byproduct of `mftraining` that is never renamed, only cleaned up.
pub const MF_UNICHARSET: &str = "mfunicharset";

/// Canonical file names for one training session.
///
/// The prefix `{dictionary}.{font}.exp{N}` is computed once on construction
/// and every other name derives from it or from the dictionary name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactNames {
    dictionary: String,
    prefix: String,
}

impl ArtifactNames {
    pub fn new(dictionary_name: &str, font_name: &str, exp_number: u32) -> Self {
        Self {
            dictionary: dictionary_name.to_owned(),
            prefix: format!("{dictionary_name}.{font_name}.exp{exp_number}"),
        }
    }

    /// The `{dictionary}.{font}.exp{N}` join key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn dictionary(&self) -> &str {
        &self.dictionary
    }

    /// Multi-page training image.
    pub fn tif(&self) -> String {
        format!("{}.tif", self.prefix)
    }

    /// Box annotation file.
    pub fn box_file(&self) -> String {
        format!("{}.box", self.prefix)
    }

    /// Feature file written by box training.
    pub fn tr(&self) -> String {
        format!("{}.tr", self.prefix)
    }

    /// Text byproduct of box training on some Tesseract builds.
    pub fn txt(&self) -> String {
        format!("{}.txt", self.prefix)
    }

    /// `{dictionary}.{artifact}` name of a renamed fixed artifact.
    pub fn scoped(&self, artifact: FixedArtifact) -> String {
        format!("{}.{}", self.dictionary, artifact.file_name())
    }

    /// Compressed word graph built from the frequent-word list.
    pub fn freq_dawg(&self) -> String {
        format!("{}.freq-dawg", self.dictionary)
    }

    /// Argument passed to `combine_tessdata`.
    pub fn combine_stem(&self) -> String {
        format!("{}.", self.dictionary)
    }

    /// Final distributable bundle.
    pub fn traineddata(&self) -> String {
        format!("{}.traineddata", self.dictionary)
    }
}
