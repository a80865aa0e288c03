// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings commands

use std::path::Path;

use crate::cli::args::{SettingsArgs, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

/// Execute the settings command against the file at `path`
pub fn execute(args: &SettingsArgs, settings: &Settings, path: &Path) -> Result<()> {
    match &args.command {
        SettingsCommands::Show => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        SettingsCommands::Path => {
            println!("{}", path.display());
        }
        SettingsCommands::Init { force } => {
            Settings::ensure_directories()?;
            if init(path, *force)? {
                println!("Wrote default settings to {}", path.display());
            } else {
                println!(
                    "Settings already exist at {} (use --force to overwrite)",
                    path.display()
                );
            }
        }
    }
    Ok(())
}

/// Write default settings unless a file exists. Returns whether it wrote.
pub fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Settings::default().save_to(path)?;
    Ok(true)
}
