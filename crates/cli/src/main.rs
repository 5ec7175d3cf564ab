// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tav: run and supervise the TransAV1 batch encoder

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tav_core::FileSettings;

use commands::args::PreviewArgs;
use commands::run::RunArgs;
use commands::settings::SettingsArgs;
use exit_error::ExitError;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TAV_BUILD_HASH"), ")");

#[derive(Parser)]
#[command(
    name = "tav",
    version,
    long_version = LONG_VERSION,
    about = "Run and supervise the TransAV1 batch encoder",
    styles = color::styles(),
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode the input directory with the saved options plus any overrides
    Run(RunArgs),
    /// Print the worker command line without running it
    Args(PreviewArgs),
    /// Inspect or change the saved options
    Settings(SettingsArgs),
}

fn main() {
    let cli = Cli::parse();
    let guard = logging::init();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
        .and_then(|runtime| runtime.block_on(run(cli)));
    let code = match result {
        Ok(()) => 0,
        Err(e) => report(&e),
    };

    drop(guard);
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    let store = FileSettings::in_config_dir().context("cannot locate the settings directory")?;
    tracing::debug!(settings = %store.path().display(), "tav starting");
    match cli.command {
        Command::Run(args) => commands::run::handle(args, &store).await,
        Command::Args(args) => commands::args::handle(args, &store),
        Command::Settings(args) => commands::settings::handle(args.command, &store),
    }
}

fn report(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        if !exit.message.is_empty() {
            eprintln!("{} {}", color::warning("error:"), exit.message);
        }
        return exit.code;
    }
    tracing::error!(error = %format!("{err:#}"), "command failed");
    eprintln!("{} {err:#}", color::warning("error:"));
    1
}
