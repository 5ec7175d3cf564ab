// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tav args`: show the worker invocation without running it.

use anyhow::Result;
use clap::Args;
use tav_core::{display_command_line, to_argv, ArgumentProvider, SettingsStore, TransAv1Args};
use tav_supervisor::SupervisorConfig;

use super::options::OptionArgs;
use crate::color;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Print the worker path and argument vector as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle(args: PreviewArgs, store: &dyn SettingsStore) -> Result<()> {
    let config = args.options.apply(store.load())?;
    if let Err(e) = config.validate() {
        eprintln!("{} {e}", color::warning("warning:"));
    }

    let worker = SupervisorConfig::from_env().worker_path;
    let worker_args = TransAv1Args.arguments(&config);
    if args.json {
        let argv: Vec<String> =
            to_argv(&worker_args).iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let doc = serde_json::json!({
            "worker": worker.display().to_string(),
            "args": argv,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{} {}", worker.display(), display_command_line(&worker_args));
    }
    Ok(())
}
