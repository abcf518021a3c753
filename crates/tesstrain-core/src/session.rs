// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Training session: a validated configuration plus the artifact names that
// every pipeline stage shares.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::config::{TrainingConfig, TrainingOptions};
use crate::error::{Result, TrainerError};
use crate::types::ArtifactNames;

/// Font names declared in a Tesseract `font_properties` file.
///
/// Each non-empty line reads `<fontname> <italic> <bold> <fixed> <serif> <fraktur>`;
/// only the leading name is significant here.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: HashSet<String>,
}

impl FontRegistry {
    pub fn parse(contents: &str) -> Self {
        let fonts = contents
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_owned)
            .collect();
        Self { fonts }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&contents))
    }

    pub fn contains(&self, font_name: &str) -> bool {
        self.fonts.contains(font_name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// One validated training run.
///
/// Construction performs every configuration check up front, so a session
/// that exists is safe to hand to the pipeline. Fields are read-only: the
/// artifact names cannot drift away from the values they were derived from.
#[derive(Debug, Clone)]
pub struct TrainingSession {
    dictionary_name: String,
    font_name: String,
    text_path: PathBuf,
    font_path: PathBuf,
    font_properties: PathBuf,
    work_dir: PathBuf,
    options: TrainingOptions,
    names: ArtifactNames,
}

impl TrainingSession {
    /// Validate `config` and derive the session's artifact names.
    ///
    /// Fails with a configuration error, without touching the filesystem
    /// beyond reads, when the font name contains whitespace, the font or
    /// text file is missing, the font is not registered, or the tessdata
    /// directory does not exist.
    #[instrument(skip_all, fields(dictionary = %config.dictionary_name, font = %config.font_name))]
    pub fn new(config: TrainingConfig) -> Result<Self> {
        let TrainingConfig {
            dictionary_name,
            text_path,
            font_name,
            font_path,
            font_properties,
            options,
        } = config;

        if dictionary_name.is_empty() {
            return Err(TrainerError::InvalidConfig(
                "dictionary name must not be empty".into(),
            ));
        }
        if font_name.is_empty() || font_name.chars().any(char::is_whitespace) {
            return Err(TrainerError::FontNameHasWhitespace(font_name));
        }
        if !font_path.is_file() {
            return Err(TrainerError::FontFileMissing(font_path));
        }
        if !text_path.is_file() {
            return Err(TrainerError::TextMissing(text_path));
        }

        let registry = FontRegistry::load(&font_properties)?;
        debug!(fonts = registry.len(), "Font registry loaded");
        if !registry.contains(&font_name) {
            return Err(TrainerError::FontNotRegistered {
                font: font_name,
                registry: font_properties,
            });
        }

        if !options.tessdata_path.is_dir() {
            return Err(TrainerError::TessdataMissing(options.tessdata_path));
        }
        if options.page.width == 0 || options.page.height == 0 {
            return Err(TrainerError::InvalidConfig(
                "page width and height must be positive".into(),
            ));
        }
        if options.font_size == 0 {
            return Err(TrainerError::InvalidConfig(
                "font size must be positive".into(),
            ));
        }

        // Tools run inside the work directory, so every input they read must
        // be addressable from there.
        let font_properties = std::path::absolute(&font_properties)?;
        let word_list = match &options.word_list {
            Some(path) => Some(std::path::absolute(path)?),
            None => None,
        };
        let options = TrainingOptions { word_list, ..options };

        let names = ArtifactNames::new(&dictionary_name, &font_name, options.exp_number);
        let work_dir = std::path::absolute(options.work_root.join(names.prefix()))?;

        info!(prefix = names.prefix(), work_dir = %work_dir.display(), "Training session ready");

        Ok(Self {
            dictionary_name,
            font_name,
            text_path,
            font_path,
            font_properties,
            work_dir,
            options,
            names,
        })
    }

    pub fn dictionary_name(&self) -> &str {
        &self.dictionary_name
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn text_path(&self) -> &Path {
        &self.text_path
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn font_properties(&self) -> &Path {
        &self.font_properties
    }

    pub fn options(&self) -> &TrainingOptions {
        &self.options
    }

    pub fn word_list(&self) -> Option<&Path> {
        self.options.word_list.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.options.verbose
    }

    /// The canonical artifact names, computed once at construction.
    pub fn names(&self) -> &ArtifactNames {
        &self.names
    }

    pub fn prefix(&self) -> &str {
        self.names.prefix()
    }

    /// Per-session directory in which every external tool runs. Always absolute.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Absolute path of a file inside the work directory.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.work_dir.join(file_name)
    }

    /// Create the work directory if it does not exist yet.
    pub fn ensure_work_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        Ok(())
    }
}
