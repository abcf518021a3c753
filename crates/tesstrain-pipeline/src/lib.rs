// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tesstrain-pipeline: Tesseract 3 training orchestration.
//
// Runs the external training tools in order inside a per-session work
// directory, checks every exit status and expected output, removes the
// intermediates afterwards and installs the finished bundle.

pub mod cleanup;
pub mod install;
pub mod pipeline;
pub mod stage;
pub mod tool;

#[cfg(test)]
mod testing;

pub use cleanup::{CleanupReport, clean_intermediates, intermediate_files};
pub use install::{hash_bytes, install_traineddata, verify_hash};
pub use pipeline::TrainingPipeline;
pub use stage::{LayoutStats, Stage, StageReport, StageStatus, TrainingReport};
pub use tool::{SystemToolRunner, ToolInvocation, ToolOutput, ToolRunner};
