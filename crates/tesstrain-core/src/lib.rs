// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tesstrain: Core types, configuration and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod session;
pub mod types;

pub use config::{TrainingConfig, TrainingOptions};
pub use error::{Result, TrainerError};
pub use session::{FontRegistry, TrainingSession};
pub use types::*;
