// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tesstrain: Train Tesseract 3 on a font.
//
// Entry point. Initialises logging, validates the configuration, runs the
// training pipeline, then cleans up and optionally installs the result.

mod args;

use std::process::ExitCode;

use clap::Parser;
use tesstrain_core::TrainingSession;
use tesstrain_core::error::Result;
use tesstrain_core::human_errors::humanize_error;
use tesstrain_pipeline::{
    SystemToolRunner, TrainingPipeline, clean_intermediates, install_traineddata,
};
use tracing::info;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start the async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("error: {err}");
            eprintln!("  {}", human.message);
            eprintln!("  hint: {}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let session = TrainingSession::new(cli.training_config()?)?;

    if cli.clean_only {
        clean_intermediates(&session)?;
        return Ok(());
    }

    let runner = SystemToolRunner::new(session.options().tool_timeout());
    let mut pipeline = TrainingPipeline::new(session.clone(), runner);
    let outcome = pipeline.run().await.map(|_| ());

    // The report is written even when a stage failed.
    if let Some(path) = &cli.report {
        pipeline.report().write_json(path)?;
        info!(path = %path.display(), "Training report written");
    }
    outcome?;

    if !cli.keep_intermediates {
        clean_intermediates(&session)?;
    }
    if cli.install {
        install_traineddata(&session)?;
    }

    info!(
        traineddata = %session.artifact_path(&session.names().traineddata()).display(),
        "Training complete"
    );
    Ok(())
}
