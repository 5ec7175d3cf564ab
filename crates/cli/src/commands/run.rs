// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tav run`: confirm, remember the options, and supervise one worker run.

use std::io::{IsTerminal, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tav_core::{Configuration, RunMode, SettingsStore, TransAv1Args};
use tav_supervisor::{
    EventStream, LogView, SessionOutcome, StopRequest, Supervisor, SupervisorConfig,
    SupervisorEvent,
};

use super::options::OptionArgs;
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{configuration_rows, format_elapsed};

/// Retained lines printed after a failed run whose output was hidden
const FAILURE_TAIL_LINES: usize = 40;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Start without asking for confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Do not remember these options for the next run
    #[arg(long)]
    pub no_save: bool,

    /// Do not print worker output as it arrives
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub async fn handle(args: RunArgs, store: &dyn SettingsStore) -> Result<()> {
    let config = args.options.apply(store.load())?;
    config.validate().map_err(|e| ExitError::usage(format!("invalid options: {e}")))?;

    if !confirm(&config, args.yes)? {
        println!("Cancelled");
        return Ok(());
    }

    if !args.no_save {
        if let Err(e) = store.save(&config) {
            tracing::warn!(error = %e, "failed to save settings");
            eprintln!("{} {e}", color::warning("warning: settings not saved:"));
        }
    }

    let show_log = config.show_log && !args.quiet;
    let (supervisor, mut events) = Supervisor::new(SupervisorConfig::from_env(), TransAv1Args);
    let handle = supervisor.start(&config).map_err(|e| ExitError::new(1, e.to_string()))?;
    let started = Instant::now();
    if !show_log {
        println!(
            "{} {}",
            color::header(&format!("Encoding (session {})", handle.id())),
            color::muted("output hidden; Ctrl-C to stop")
        );
    }

    let (outcome, view) = follow(&supervisor, &mut events, show_log).await;
    let elapsed = format_elapsed(started.elapsed());
    if outcome.is_success() {
        println!("{} in {elapsed}", color::header("Finished"));
        return Ok(());
    }

    eprintln!("{} {outcome} after {elapsed}", color::warning("Worker"));
    if !show_log && !view.is_empty() {
        eprintln!("{}", color::header("Last output:"));
        for line in view.tail(FAILURE_TAIL_LINES) {
            eprintln!("  {line}");
        }
    }
    Err(ExitError::from_worker_code(outcome.exit_code()).into())
}

/// Consume supervisor events until the session ends. The first Ctrl-C asks
/// the worker to stop; the second shuts the supervisor down.
async fn follow(
    supervisor: &Supervisor,
    events: &mut EventStream,
    show_log: bool,
) -> (SessionOutcome, LogView) {
    let mut view = LogView::new();
    let mut interrupts = 0u32;
    let mut signals = true;

    let outcome = loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(SupervisorEvent::LogBatch(batch)) => record(&mut view, &batch, show_log),
                Some(SupervisorEvent::SessionEnded(outcome)) => break outcome,
                None => {
                    break SessionOutcome::Failed { reason: "supervisor stopped unexpectedly".into() }
                }
            },
            signal = tokio::signal::ctrl_c(), if signals => {
                if let Err(e) = signal {
                    tracing::warn!(error = %e, "cannot listen for Ctrl-C");
                    signals = false;
                    continue;
                }
                interrupts += 1;
                if interrupts == 1 {
                    match supervisor.request_stop() {
                        StopRequest::Initiated => eprintln!(
                            "{}",
                            color::muted("stopping worker; press Ctrl-C again to stop waiting")
                        ),
                        StopRequest::AlreadyStopping | StopRequest::NotRunning => {}
                    }
                } else {
                    eprintln!("{}", color::muted("shutting down"));
                    supervisor.shutdown().await;
                }
            }
        }
    };

    // final flush, then pick up whatever it delivered
    supervisor.shutdown().await;
    while let Some(event) = events.try_recv() {
        if let SupervisorEvent::LogBatch(batch) = event {
            record(&mut view, &batch, show_log);
        }
    }
    (outcome, view)
}

fn record(view: &mut LogView, batch: &str, show_log: bool) {
    if view.append(batch) {
        tracing::debug!(retained = view.len_chars(), "log view truncated");
    }
    if show_log {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(batch.as_bytes());
        let _ = stdout.flush();
    }
}

/// Ask before starting when a terminal is attached. Without one, `--yes` is
/// only required for force start.
fn confirm(config: &Configuration, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    let force = config.mode == RunMode::ForceStart;
    if !std::io::stdin().is_terminal() {
        if force {
            return Err(ExitError::usage(
                "force start deletes the output directory contents; pass --yes to confirm",
            )
            .into());
        }
        return Ok(true);
    }

    println!("{}", color::header("About to start encoding:"));
    for (label, value) in configuration_rows(config) {
        println!("  {} {}", color::context(&format!("{label:<12}")), color::literal(&value));
    }
    if force {
        println!(
            "{}",
            color::warning(&format!(
                "Force start deletes everything in {} before encoding.",
                config.output_dir.display()
            ))
        );
    }
    print!("Start? [y/N] ");
    std::io::stdout().flush().context("failed to write prompt")?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer).context("failed to read confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
