// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Training pipeline: the eight-stage state machine.
//
// Each stage consumes files left in the session's work directory by earlier
// stages and names its outputs from the session prefix or dictionary name. A
// stage only counts as completed when its tool exited successfully and every
// file it is expected to produce exists.

use std::time::Instant;

use chrono::Utc;
use tesstrain_core::error::{Result, TrainerError};
use tesstrain_core::{FixedArtifact, MergerKind, TrainingSession};
use tesstrain_layout::{
    FontRenderer, LayoutSummary, PageLayoutEngine, PageMerger, PageRenderer, PageSpool,
    TiffPageMerger, write_box_file,
};
use tracing::{debug, info, instrument, warn};

use crate::stage::{LayoutStats, Stage, StageReport, StageStatus, TrainingReport};
use crate::tool::{ToolInvocation, ToolOutput, ToolRunner};

/// Drives one [`TrainingSession`] through every training stage.
///
/// Stages run strictly in order. A failed stage leaves the pipeline positioned
/// on that stage, so [`TrainingPipeline::advance`] retries it.
pub struct TrainingPipeline<R: ToolRunner> {
    session: TrainingSession,
    runner: R,
    renderer: Option<Box<dyn PageRenderer + Send + Sync>>,
    next: Option<Stage>,
    report: TrainingReport,
}

impl<R: ToolRunner> TrainingPipeline<R> {
    pub fn new(session: TrainingSession, runner: R) -> Self {
        let report = TrainingReport::new(
            session.prefix(),
            session.dictionary_name(),
            session.work_dir(),
        );
        Self {
            session,
            runner,
            renderer: None,
            next: Some(Stage::Layout),
            report,
        }
    }

    /// Draw pages with `renderer` instead of rasterising the session font.
    pub fn with_renderer(mut self, renderer: impl PageRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn session(&self) -> &TrainingSession {
        &self.session
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn into_report(self) -> TrainingReport {
        self.report
    }

    /// The stage [`advance`](Self::advance) will run, or `None` once finished.
    pub fn next_stage(&self) -> Option<Stage> {
        self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next.is_none()
    }

    /// Stages that will actually execute for this session.
    pub fn planned_stages(&self) -> Vec<Stage> {
        Stage::ALL
            .into_iter()
            .filter(|stage| *stage != Stage::DictionaryData || self.session.word_list().is_some())
            .collect()
    }

    /// Run every remaining stage.
    #[instrument(skip_all, fields(prefix = %self.session.prefix()))]
    pub async fn run(&mut self) -> Result<&TrainingReport> {
        while !self.is_finished() {
            self.advance().await?;
        }
        info!(
            traineddata = %self.session.names().traineddata(),
            "The trained data bundle has been generated"
        );
        Ok(&self.report)
    }

    /// Run the next stage and record its outcome.
    pub async fn advance(&mut self) -> Result<StageReport> {
        let stage = self.next.ok_or(TrainerError::PipelineFinished)?;
        let started_at = Utc::now();
        let clock = Instant::now();

        let outcome = self.execute(stage).await;
        let elapsed_ms = clock.elapsed().as_millis() as u64;

        let record = match outcome {
            Ok((status, outputs)) => StageReport {
                stage,
                status,
                started_at,
                elapsed_ms,
                outputs,
                error: None,
            },
            Err(err) => {
                warn!(%stage, error = %err, "Stage failed");
                self.report.stages.push(StageReport {
                    stage,
                    status: StageStatus::Failed,
                    started_at,
                    elapsed_ms,
                    outputs: Vec::new(),
                    error: Some(err.to_string()),
                });
                return Err(err);
            }
        };

        info!(%stage, status = ?record.status, elapsed_ms, "Stage finished");
        self.report.stages.push(record.clone());
        self.next = stage.next();
        if self.next.is_none() {
            self.report.finished_at = Some(Utc::now());
            self.report.traineddata =
                Some(self.session.artifact_path(&self.session.names().traineddata()));
        }
        Ok(record)
    }

    async fn execute(&mut self, stage: Stage) -> Result<(StageStatus, Vec<String>)> {
        self.session.ensure_work_dir()?;
        let names = self.session.names().clone();

        let outputs = match stage {
            Stage::Layout => {
                let stats = self.layout().await?;
                self.report.layout = stats;
                vec![names.tif(), names.box_file()]
            }
            Stage::BoxTrain => {
                let psm = self.session.options().page_seg_mode.to_string();
                self.invoke(
                    stage,
                    self.tool(stage)
                        .args(["-psm", psm.as_str()])
                        .arg(names.tif())
                        .arg(names.prefix())
                        .args(["nobatch", "box.train"]),
                )
                .await?;
                vec![names.tr()]
            }
            Stage::CharsetExtract => {
                self.invoke(stage, self.tool(stage).arg(names.box_file())).await?;
                vec![FixedArtifact::Unicharset.file_name().to_owned()]
            }
            Stage::Cluster => {
                let invocation = self
                    .tool(stage)
                    .arg("-F")
                    .arg(self.session.font_properties())
                    .arg("-U")
                    .arg(FixedArtifact::Unicharset.file_name())
                    .arg(names.tr());
                self.invoke(stage, invocation).await?;
                if !self.exists(FixedArtifact::Microfeat.file_name()) {
                    debug!("mftraining did not write Microfeat");
                }
                vec![
                    FixedArtifact::Inttemp.file_name().to_owned(),
                    FixedArtifact::Pffmtable.file_name().to_owned(),
                ]
            }
            Stage::Normalize => {
                self.invoke(stage, self.tool(stage).arg(names.tr())).await?;
                vec![FixedArtifact::Normproto.file_name().to_owned()]
            }
            Stage::Rename => self.rename_artifacts()?,
            Stage::DictionaryData => {
                let Some(word_list) = self.session.word_list() else {
                    debug!("No word list configured; skipping dictionary data");
                    return Ok((StageStatus::Skipped, Vec::new()));
                };
                let invocation = self
                    .tool(stage)
                    .arg(word_list)
                    .arg(names.freq_dawg())
                    .arg(names.scoped(FixedArtifact::Unicharset));
                self.invoke(stage, invocation).await?;
                vec![names.freq_dawg()]
            }
            Stage::Combine => {
                self.invoke(stage, self.tool(stage).arg(names.combine_stem())).await?;
                vec![names.traineddata()]
            }
        };

        for output in &outputs {
            if !self.exists(output) {
                return Err(TrainerError::MissingArtifact {
                    stage: stage.to_string(),
                    path: self.session.artifact_path(output),
                });
            }
        }
        Ok((StageStatus::Completed, outputs))
    }

    /// Render the training text, merge the pages and write the box file.
    async fn layout(&self) -> Result<LayoutStats> {
        let names = self.session.names();
        let tif = self.session.artifact_path(&names.tif());
        let (summary, spool) = self.render_pages()?;

        match self.session.options().merger {
            MergerKind::Native => TiffPageMerger.merge(spool.pages(), &tif)?,
            MergerKind::ImageMagick => {
                let invocation = ToolInvocation::new("convert", self.session.work_dir())
                    .args(spool.pages().iter().map(|p| p.as_os_str().to_owned()))
                    .arg(&tif);
                self.invoke(Stage::Layout, invocation).await?;
            }
        }
        spool.close()?;

        write_box_file(self.session.artifact_path(&names.box_file()), &summary.boxes)?;
        if summary.overflowing_words > 0 {
            warn!(
                words = summary.overflowing_words,
                "Some words are wider than a page line and were drawn past the margin"
            );
        }

        Ok(LayoutStats {
            pages: summary.page_count,
            boxes: summary.boxes.len(),
            overflowing_words: summary.overflowing_words,
        })
    }

    fn render_pages(&self) -> Result<(LayoutSummary, PageSpool)> {
        let text = std::fs::read_to_string(self.session.text_path())?;
        let engine = PageLayoutEngine::new(self.session.options().page);
        let mut spool = PageSpool::new_in(self.session.work_dir())?;

        let summary = match &self.renderer {
            Some(renderer) => engine.layout(&text, &**renderer, &mut spool)?,
            None => {
                let font = FontRenderer::from_file(
                    self.session.font_path(),
                    self.session.options().font_size,
                )?;
                engine.layout(&text, &font, &mut spool)?
            }
        };
        Ok((summary, spool))
    }

    /// Move the fixed-name tool outputs into the dictionary namespace.
    fn rename_artifacts(&self) -> Result<Vec<String>> {
        let names = self.session.names();
        let mut renamed = Vec::new();
        for artifact in FixedArtifact::ALL {
            let from = self.session.artifact_path(artifact.file_name());
            let to_name = names.scoped(artifact);
            if !from.exists() {
                // Tesseract 3.02 and later no longer write Microfeat.
                if artifact == FixedArtifact::Microfeat {
                    debug!("No Microfeat to rename");
                    continue;
                }
                return Err(TrainerError::MissingArtifact {
                    stage: Stage::Rename.to_string(),
                    path: from,
                });
            }
            std::fs::rename(&from, self.session.artifact_path(&to_name))?;
            debug!(from = artifact.file_name(), to = %to_name, "Artifact renamed");
            renamed.push(to_name);
        }
        Ok(renamed)
    }

    fn tool(&self, stage: Stage) -> ToolInvocation {
        ToolInvocation::new(stage.tool().unwrap_or_default(), self.session.work_dir())
    }

    fn exists(&self, file_name: &str) -> bool {
        self.session.artifact_path(file_name).exists()
    }

    /// Run a tool and turn an unsuccessful exit into [`TrainerError::ToolFailed`].
    async fn invoke(&self, stage: Stage, invocation: ToolInvocation) -> Result<ToolOutput> {
        info!(%stage, command = %invocation.command_line(), "Running tool");
        let output = self.runner.run(&invocation).await?;
        self.echo(&invocation.program, &output);

        if !output.success {
            return Err(TrainerError::ToolFailed {
                tool: invocation.program,
                stage: stage.to_string(),
                status: output.status,
                stderr: output.stderr.trim().to_owned(),
            });
        }
        Ok(output)
    }

    fn echo(&self, tool: &str, output: &ToolOutput) {
        let verbose = self.session.verbose();
        for line in output.stdout.lines().chain(output.stderr.lines()) {
            if line.trim().is_empty() {
                continue;
            }
            if verbose {
                info!(tool, "{line}");
            } else {
                debug!(tool, "{line}");
            }
        }
    }
}
