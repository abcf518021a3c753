// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for tesstrain.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Top-level error type for all tesstrain operations.
#[derive(Debug, Error)]
pub enum TrainerError {
    // -- Configuration errors (raised before any stage runs) --
    #[error("font name {0:?} must not contain whitespace")]
    FontNameHasWhitespace(String),

    #[error("font file {} does not exist", .0.display())]
    FontFileMissing(PathBuf),

    #[error("font {font:?} is not defined in the font properties file {}", registry.display())]
    FontNotRegistered { font: String, registry: PathBuf },

    #[error("tessdata directory {} does not exist", .0.display())]
    TessdataMissing(PathBuf),

    #[error("training text {} does not exist", .0.display())]
    TextMissing(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Rendering --
    #[error("font loading failed: {0}")]
    Font(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- External tools --
    #[error("failed to launch {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} did not finish within {}s", .timeout.as_secs())]
    ToolTimeout { tool: String, timeout: Duration },

    #[error("{tool} failed during {stage} (exit status {}): {stderr}", status_label(.status))]
    ToolFailed {
        tool: String,
        stage: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{stage} finished without producing {}", path.display())]
    MissingArtifact { stage: String, path: PathBuf },

    #[error("pipeline already finished; no stage left to run")]
    PipelineFinished,

    // -- Installation --
    #[error(
        "insufficient privilege to copy {} to {}",
        source_path.display(),
        destination.display()
    )]
    InsufficientPrivilege {
        source_path: PathBuf,
        destination: PathBuf,
    },

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "killed by signal".to_owned(),
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TrainerError>;
