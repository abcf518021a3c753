// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language explanations for training failures.
//
// Every error maps to a one-line summary and a concrete next step, shown by
// the command-line front end after the technical message.

use crate::error::TrainerError;

/// A human-readable error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
}

impl HumanError {
    fn new(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// Convert a `TrainerError` into a `HumanError`.
pub fn humanize_error(err: &TrainerError) -> HumanError {
    match err {
        // -- Configuration --
        TrainerError::FontNameHasWhitespace(name) => HumanError::new(
            format!("The font name {name:?} contains spaces."),
            "Use the space-free name under which the font is listed in font_properties.",
        ),
        TrainerError::FontFileMissing(path) => HumanError::new(
            "The font file could not be found.",
            format!("Check the --font-path value ({}).", path.display()),
        ),
        TrainerError::FontNotRegistered { font, registry } => HumanError::new(
            format!("The font {font:?} is not declared in the font properties file."),
            format!(
                "Add a line such as `{font} 0 0 0 0 0` to {}.",
                registry.display()
            ),
        ),
        TrainerError::TessdataMissing(path) => HumanError::new(
            "The tessdata directory does not exist.",
            format!(
                "Install Tesseract or point --tessdata-path at an existing directory ({}).",
                path.display()
            ),
        ),
        TrainerError::TextMissing(path) => HumanError::new(
            "The training text could not be found.",
            format!("Check the --text value ({}).", path.display()),
        ),
        TrainerError::InvalidConfig(detail) => HumanError::new(
            "The training configuration is invalid.",
            detail.clone(),
        ),

        // -- Rendering --
        TrainerError::Font(_) => HumanError::new(
            "The font file could not be read as a TrueType or OpenType font.",
            "Pass a .ttf or .otf file.",
        ),
        TrainerError::Image(_) => HumanError::new(
            "A training page could not be written.",
            "Check free disk space and write access to the work directory.",
        ),

        // -- External tools --
        TrainerError::ToolSpawn { tool, .. } => HumanError::new(
            format!("The `{tool}` program could not be started."),
            match tool.as_str() {
                "convert" => "Install ImageMagick, or use the native page merger.",
                _ => "Install the Tesseract 3 training tools and make sure they are on PATH.",
            },
        ),
        TrainerError::ToolTimeout { tool, .. } => HumanError::new(
            format!("`{tool}` took too long and was stopped."),
            "Raise the tool timeout or train on a shorter text.",
        ),
        TrainerError::ToolFailed { tool, stage, .. } => HumanError::new(
            format!("`{tool}` failed during the {stage} stage."),
            "Re-run with verbose output enabled and read the tool's error output above.",
        ),
        TrainerError::MissingArtifact { stage, path } => HumanError::new(
            format!("The {stage} stage did not produce {}.", path.display()),
            "Check that the installed Tesseract training tools match version 3.0x.",
        ),
        TrainerError::PipelineFinished => HumanError::new(
            "Training already completed.",
            "Start a new session to train again.",
        ),

        // -- Installation --
        TrainerError::InsufficientPrivilege { destination, .. } => HumanError::new(
            "Permission denied while installing the trained data.",
            format!(
                "Super-user rights are required to write to {}.",
                destination.display()
            ),
        ),
        TrainerError::IntegrityMismatch { .. } => HumanError::new(
            "The installed trained data does not match the generated file.",
            "Install again; the copy was corrupted.",
        ),

        // -- Storage --
        TrainerError::Io(_) => HumanError::new(
            "A file operation failed.",
            "Check that the work directory exists and is writable.",
        ),
        TrainerError::Serialization(_) => HumanError::new(
            "A configuration or report file is not valid JSON.",
            "Fix the JSON syntax and try again.",
        ),
    }
}
