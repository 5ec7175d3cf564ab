// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tav settings`: inspect or change the remembered options.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tav_core::{Configuration, FileSettings, SettingsStore};

use super::options::OptionArgs;
use crate::color;
use crate::output::{print_configuration, OutputFormat};

#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show the saved options
    Show {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the settings file location
    Path,
    /// Change saved options without starting a run
    Set {
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Restore the default options
    Reset,
}

pub fn handle(command: SettingsCommand, store: &FileSettings) -> Result<()> {
    match command {
        SettingsCommand::Show { format } => print_configuration(&store.load(), format)?,
        SettingsCommand::Path => println!("{}", store.path().display()),
        SettingsCommand::Set { options } => {
            let config = options.apply(store.load())?;
            store.save(&config).context("failed to save settings")?;
            print_configuration(&config, OutputFormat::Text)?;
        }
        SettingsCommand::Reset => {
            store.save(&Configuration::default()).context("failed to save settings")?;
            println!("{} {}", color::header("Settings reset:"), store.path().display());
        }
    }
    Ok(())
}
