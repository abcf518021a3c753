// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles: a session fixture on a temporary directory and a tool runner
// that writes the files each Tesseract training tool would produce.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tesstrain_core::error::Result;
use tesstrain_core::{TrainingConfig, TrainingOptions, TrainingSession};

use crate::tool::{ToolInvocation, ToolOutput, ToolRunner};

pub(crate) struct SessionFixture {
    pub(crate) dir: tempfile::TempDir,
}

impl SessionFixture {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("font.ttf"), b"unused by fixed cells").expect("font");
        std::fs::write(dir.path().join("train.txt"), "the quick\nbrown fox").expect("text");
        std::fs::write(dir.path().join("font_properties"), "dejavu 0 0 0 1 0\n").expect("registry");
        std::fs::write(dir.path().join("words.txt"), "the\nquick\nfox\n").expect("words");
        std::fs::create_dir(dir.path().join("tessdata")).expect("tessdata");
        Self { dir }
    }

    pub(crate) fn word_list(&self) -> PathBuf {
        self.dir.path().join("words.txt")
    }

    pub(crate) fn tessdata(&self) -> PathBuf {
        self.dir.path().join("tessdata")
    }

    /// Session named `eng.dejavu.exp{N}` with small pages, rooted in the fixture.
    pub(crate) fn session(&self, options: TrainingOptions) -> TrainingSession {
        let root = self.dir.path();
        let mut options = TrainingOptions {
            tessdata_path: self.tessdata(),
            work_root: root.to_path_buf(),
            ..options
        };
        options.page.width = 1000;
        options.page.height = 1000;
        let config = TrainingConfig::new(
            "eng",
            root.join("train.txt"),
            "dejavu",
            root.join("font.ttf"),
            root.join("font_properties"),
        )
        .with_options(options);
        TrainingSession::new(config).expect("session")
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Exit with status 1 without writing anything.
    Fail,
    /// Exit successfully without writing anything.
    Silent,
}

/// Records every invocation and simulates the outputs of the training tools.
#[derive(Clone)]
pub(crate) struct RecordingRunner {
    calls: Arc<Mutex<Vec<ToolInvocation>>>,
    target: Option<String>,
    mode: Mode,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            target: None,
            mode: Mode::Normal,
        }
    }
}

impl RecordingRunner {
    pub(crate) fn failing_on(program: &str) -> Self {
        Self {
            target: Some(program.to_owned()),
            mode: Mode::Fail,
            ..Self::default()
        }
    }

    pub(crate) fn silent_on(program: &str) -> Self {
        Self {
            target: Some(program.to_owned()),
            mode: Mode::Silent,
            ..Self::default()
        }
    }

    pub(crate) fn invocations(&self) -> Vec<ToolInvocation> {
        self.calls.lock().expect("lock").clone()
    }

    pub(crate) fn programs(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.program).collect()
    }

    fn mode_for(&self, program: &str) -> Mode {
        match &self.target {
            Some(target) if target == program => self.mode,
            _ => Mode::Normal,
        }
    }
}

fn touch(dir: &Path, name: impl AsRef<Path>) {
    std::fs::write(dir.join(name), b"simulated").expect("write simulated output");
}

fn arg(invocation: &ToolInvocation, index: usize) -> String {
    invocation.args[index].to_string_lossy().into_owned()
}

impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        self.calls.lock().expect("lock").push(invocation.clone());

        match self.mode_for(&invocation.program) {
            Mode::Fail => {
                return Ok(ToolOutput {
                    status: Some(1),
                    success: false,
                    stderr: "simulated failure\n".into(),
                    ..ToolOutput::default()
                });
            }
            Mode::Silent => {
                return Ok(ToolOutput {
                    status: Some(0),
                    success: true,
                    ..ToolOutput::default()
                });
            }
            Mode::Normal => {}
        }

        let dir = invocation.current_dir.as_path();
        match invocation.program.as_str() {
            "convert" => touch(dir, arg(invocation, invocation.args.len() - 1)),
            "tesseract" => {
                let prefix = arg(invocation, 3);
                touch(dir, format!("{prefix}.tr"));
                touch(dir, format!("{prefix}.txt"));
            }
            "unicharset_extractor" => touch(dir, "unicharset"),
            "mftraining" => {
                for name in ["inttemp", "pffmtable", "Microfeat", "mfunicharset"] {
                    touch(dir, name);
                }
            }
            "cntraining" => touch(dir, "normproto"),
            "wordlist2dawg" => touch(dir, arg(invocation, 1)),
            "combine_tessdata" => touch(dir, format!("{}traineddata", arg(invocation, 0))),
            other => panic!("unexpected tool {other}"),
        }

        Ok(ToolOutput {
            status: Some(0),
            success: true,
            stdout: format!("{} done\n", invocation.program),
            elapsed: Duration::from_millis(1),
            ..ToolOutput::default()
        })
    }
}
