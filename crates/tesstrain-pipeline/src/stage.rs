// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Training stages and the per-run report.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tesstrain_core::error::Result;

/// The eight training stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Render the text to a multi-page image and write the box file.
    Layout,
    /// `tesseract ... box.train`: extract character features.
    BoxTrain,
    /// `unicharset_extractor`: build the character set.
    CharsetExtract,
    /// `mftraining`: cluster shape prototypes.
    Cluster,
    /// `cntraining`: character normalisation prototypes.
    Normalize,
    /// Move fixed-name artifacts into the dictionary namespace.
    Rename,
    /// `wordlist2dawg`: optional frequent-word graph.
    DictionaryData,
    /// `combine_tessdata`: bundle everything into `.traineddata`.
    Combine,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Layout,
        Stage::BoxTrain,
        Stage::CharsetExtract,
        Stage::Cluster,
        Stage::Normalize,
        Stage::Rename,
        Stage::DictionaryData,
        Stage::Combine,
    ];

    /// The stage that follows this one, or `None` after [`Stage::Combine`].
    pub fn next(self) -> Option<Stage> {
        let index = Self::ALL.iter().position(|s| *s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::BoxTrain => "box-train",
            Self::CharsetExtract => "charset-extract",
            Self::Cluster => "cluster",
            Self::Normalize => "normalize",
            Self::Rename => "rename",
            Self::DictionaryData => "dictionary-data",
            Self::Combine => "combine",
        }
    }

    /// External program run by this stage, if any.
    pub fn tool(self) -> Option<&'static str> {
        match self {
            Self::Layout | Self::Rename => None,
            Self::BoxTrain => Some("tesseract"),
            Self::CharsetExtract => Some("unicharset_extractor"),
            Self::Cluster => Some("mftraining"),
            Self::Normalize => Some("cntraining"),
            Self::DictionaryData => Some("wordlist2dawg"),
            Self::Combine => Some("combine_tessdata"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a stage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    Completed,
    /// Not applicable to this session (no word list for dictionary data).
    Skipped,
    Failed,
}

/// Record of one executed or skipped stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: Stage,
    pub status: StageStatus,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    /// Files the stage produced, relative to the work directory.
    pub outputs: Vec<String>,
    /// Trimmed stderr of a failed tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Layout statistics carried into the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    pub pages: usize,
    pub boxes: usize,
    pub overflowing_words: usize,
}

/// Summary of a training run, written as JSON by `--report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub prefix: String,
    pub dictionary: String,
    pub work_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traineddata: Option<PathBuf>,
    #[serde(default)]
    pub layout: LayoutStats,
    pub stages: Vec<StageReport>,
}

impl TrainingReport {
    pub fn new(prefix: &str, dictionary: &str, work_dir: &Path) -> Self {
        Self {
            prefix: prefix.to_owned(),
            dictionary: dictionary.to_owned(),
            work_dir: work_dir.to_path_buf(),
            started_at: Utc::now(),
            finished_at: None,
            traineddata: None,
            layout: LayoutStats::default(),
            stages: Vec::new(),
        }
    }

    /// Status recorded for `stage`, if it has run.
    pub fn status_of(&self, stage: Stage) -> Option<StageStatus> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| r.status)
    }

    pub fn is_complete(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_in_order_and_end_after_combine() {
        let mut walked = vec![Stage::Layout];
        let mut current = Stage::Layout;
        while let Some(next) = current.next() {
            walked.push(next);
            current = next;
        }
        assert_eq!(walked, Stage::ALL);
        assert_eq!(Stage::Combine.next(), None);
    }

    #[test]
    fn only_external_stages_name_a_tool() {
        assert_eq!(Stage::Layout.tool(), None);
        assert_eq!(Stage::Rename.tool(), None);
        assert_eq!(Stage::Cluster.tool(), Some("mftraining"));
    }

    #[test]
    fn stage_serializes_as_kebab_case() {
        let json = serde_json::to_string(&Stage::DictionaryData).expect("serialize");
        assert_eq!(json, "\"dictionary-data\"");
        assert_eq!(Stage::DictionaryData.to_string(), "dictionary-data");
    }

    #[test]
    fn report_writes_readable_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut report = TrainingReport::new("eng.mono.exp0", "eng", dir.path());
        report.stages.push(StageReport {
            stage: Stage::Layout,
            status: StageStatus::Completed,
            started_at: Utc::now(),
            elapsed_ms: 12,
            outputs: vec!["eng.mono.exp0.tif".into(), "eng.mono.exp0.box".into()],
            error: None,
        });

        let path = dir.path().join("report.json");
        report.write_json(&path).expect("write");
        let parsed: TrainingReport =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
        assert_eq!(parsed.prefix, "eng.mono.exp0");
        assert_eq!(parsed.status_of(Stage::Layout), Some(StageStatus::Completed));
        assert_eq!(parsed.status_of(Stage::Combine), None);
        assert!(!parsed.is_complete());
    }
}
