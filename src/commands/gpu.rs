// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU picker command

use crate::cli::args::{GpuArgs, GpuCommands, GpuPickArgs, OutputFormat};
use crate::config::{GpuConfig, Settings};
use crate::error::Result;
use crate::gpu::{pick_idle_gpu, GpuSelection, NvidiaSmi, PickerOptions, CUDA_VISIBLE_DEVICES};

/// Execute the gpu command
pub async fn execute(args: &GpuArgs, settings: &Settings, format: &OutputFormat) -> Result<()> {
    match &args.command {
        GpuCommands::Pick(pick) => {
            let config = effective_config(&settings.gpu, pick);
            let query = NvidiaSmi::from_config(&config);
            let selection = pick_idle_gpu(&query, &PickerOptions::from_config(&config)).await?;
            println!("{}", render(&selection, pick.export, format)?);
            Ok(())
        }
    }
}

/// Settings with the command-line overrides applied
pub fn effective_config(base: &GpuConfig, args: &GpuPickArgs) -> GpuConfig {
    let mut config = base.clone();
    if let Some(mem) = args.mem_threshold {
        config.mem_threshold_mib = mem;
    }
    if let Some(util) = args.util_threshold {
        config.util_threshold_pct = util;
    }
    if let Some(timeout) = args.timeout {
        config.query_timeout_secs = timeout;
    }
    if args.no_set_env {
        config.set_env = false;
    }
    config
}

fn render(selection: &GpuSelection, export: bool, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(selection)?,
        // The status line goes to stderr so `eval "$(catalyst gpu pick --export)"` works.
        OutputFormat::Text if export => {
            eprintln!("{}", selection.status_line());
            format!("export {}={}", CUDA_VISIBLE_DEVICES, selection.index())
        }
        OutputFormat::Text => selection.status_line(),
    })
}
