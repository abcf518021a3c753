// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Removal of training intermediates.

use std::io::ErrorKind;

use tesstrain_core::error::Result;
use tesstrain_core::{FixedArtifact, MF_UNICHARSET, TrainingSession};
use tracing::{debug, info, instrument};

/// What a cleanup pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<String>,
    /// Files that were already absent.
    pub missing: Vec<String>,
}

/// Intermediate file names for `session`, relative to its work directory.
///
/// The frequent-word graph is included only when a word list is configured.
pub fn intermediate_files(session: &TrainingSession) -> Vec<String> {
    let names = session.names();
    let mut files = vec![names.box_file(), names.tr(), names.txt()];
    files.extend(FixedArtifact::ALL.iter().map(|a| names.scoped(*a)));
    if session.word_list().is_some() {
        files.push(names.freq_dawg());
    }
    files.push(MF_UNICHARSET.to_owned());
    files
}

/// Delete every intermediate left by a training run.
///
/// Absent files are skipped, so this is safe to call at any point and any
/// number of times. The multi-page image and the trained data are kept.
#[instrument(skip_all, fields(prefix = %session.prefix()))]
pub fn clean_intermediates(session: &TrainingSession) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();
    for name in intermediate_files(session) {
        match std::fs::remove_file(session.artifact_path(&name)) {
            Ok(()) => {
                debug!(file = %name, "Removed");
                report.removed.push(name);
            }
            Err(err) if err.kind() == ErrorKind::NotFound => report.missing.push(name),
            Err(err) => return Err(err.into()),
        }
    }
    info!(
        removed = report.removed.len(),
        missing = report.missing.len(),
        "Training intermediates removed"
    );
    Ok(report)
}
