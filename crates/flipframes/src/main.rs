mod cli;

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use flipframes_core::output::write_video_data;
use flipframes_core::pipeline;
use flipframes_core::Error;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(report_failure(&err, &mut std::io::stderr())),
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let config = cli.into_config()?;
    info!(input_dir = ?config.input_dir, output = ?config.output, "starting conversion");

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let video =
        pipeline::run_pipeline(&config, Some(&mut lock)).context("conversion failed")?;

    let path = write_video_data(&video, &config.output).context("saving video data failed")?;

    info!(?path, frame_count = video.len(), "file saved");
    Ok(())
}

/// Process exit code for a failed run. Errors without a typed cause map to 1.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}

/// Print the full error chain regardless of the log filter and pick the exit code.
fn report_failure(err: &anyhow::Error, out: &mut dyn Write) -> u8 {
    let _ = writeln!(out, "error: {err:#}");
    exit_code(err)
}
