// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their translation into a training configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tesstrain_core::error::{Result, TrainerError};
use tesstrain_core::{MergerKind, TrainingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "tesstrain",
    version,
    about = "Train Tesseract 3 to recognise a new font",
    long_about = "Renders a training text with the given font onto synthetic pages, writes the \
                  matching box file, then runs the Tesseract 3 training tools to produce \
                  {dictionary}.traineddata.",
    after_help = "EXAMPLES:\n  \
                  tesstrain -l eng -t train.txt -F dejavu -f DejaVuSans.ttf -p font_properties\n  \
                  tesstrain --config training.json --install\n  \
                  tesstrain --config training.json --clean-only"
)]
pub struct Cli {
    /// Dictionary name of the trained data (e.g. `eng`)
    #[arg(short = 'l', long)]
    pub dictionary_name: Option<String>,

    /// UTF-8 text rendered into the training pages
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// Font name as listed in the font properties file (no spaces)
    #[arg(short = 'F', long)]
    pub font_name: Option<String>,

    /// TrueType/OpenType font file
    #[arg(short = 'f', long)]
    pub font_path: Option<PathBuf>,

    /// Tesseract `font_properties` file
    #[arg(short = 'p', long)]
    pub font_properties: Option<PathBuf>,

    /// Font size in pixels [default: 25]
    #[arg(short = 's', long)]
    pub font_size: Option<u32>,

    /// Experience number [default: 0]
    #[arg(short = 'e', long)]
    pub exp_number: Option<u32>,

    /// Tessdata directory [default: /usr/share/tessdata]
    #[arg(short = 'd', long)]
    pub tessdata_path: Option<PathBuf>,

    /// Frequent-word list; enables the dictionary-data stage
    #[arg(short = 'w', long)]
    pub word_list: Option<PathBuf>,

    /// Parent directory of the per-session work directory [default: .]
    #[arg(long)]
    pub work_root: Option<PathBuf>,

    /// Page merger used to build the multi-page TIFF [default: native]
    #[arg(long, value_enum)]
    pub merger: Option<MergerArg>,

    /// Timeout for each external tool, in seconds [default: 1800]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Load settings from a JSON file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not echo the training tools' output
    #[arg(short, long)]
    pub quiet: bool,

    /// Keep intermediate files after training
    #[arg(long)]
    pub keep_intermediates: bool,

    /// Copy the trained data into the tessdata directory
    #[arg(long)]
    pub install: bool,

    /// Only remove intermediates of a previous run
    #[arg(long, conflicts_with_all = ["install", "keep_intermediates"])]
    pub clean_only: bool,

    /// Write a JSON training report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergerArg {
    Native,
    Imagemagick,
}

impl From<MergerArg> for MergerKind {
    fn from(arg: MergerArg) -> Self {
        match arg {
            MergerArg::Native => MergerKind::Native,
            MergerArg::Imagemagick => MergerKind::ImageMagick,
        }
    }
}

impl Cli {
    /// Build the training configuration, layering explicit flags over the
    /// optional JSON file over built-in defaults.
    pub fn training_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::new(
                required(&self.dictionary_name, "--dictionary-name")?,
                required(&self.text, "--text")?,
                required(&self.font_name, "--font-name")?,
                required(&self.font_path, "--font-path")?,
                required(&self.font_properties, "--font-properties")?,
            ),
        };

        override_with(&mut config.dictionary_name, &self.dictionary_name);
        override_with(&mut config.text_path, &self.text);
        override_with(&mut config.font_name, &self.font_name);
        override_with(&mut config.font_path, &self.font_path);
        override_with(&mut config.font_properties, &self.font_properties);

        let options = &mut config.options;
        override_with(&mut options.font_size, &self.font_size);
        override_with(&mut options.exp_number, &self.exp_number);
        override_with(&mut options.tessdata_path, &self.tessdata_path);
        override_with(&mut options.work_root, &self.work_root);
        override_with(&mut options.tool_timeout_secs, &self.timeout);
        if let Some(word_list) = &self.word_list {
            options.word_list = Some(word_list.clone());
        }
        if let Some(merger) = self.merger {
            options.merger = merger.into();
        }
        if self.quiet {
            options.verbose = false;
        }

        Ok(config)
    }
}

fn required<T: Clone>(value: &Option<T>, flag: &str) -> Result<T> {
    value
        .clone()
        .ok_or_else(|| TrainerError::InvalidConfig(format!("{flag} is required without --config")))
}

fn override_with<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
