// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! catalyst - text-guided Gaussian Splatting editing toolkit
//!
//! Entry point for the catalyst CLI application.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    ExecutableCommand,
};

use catalyst::cli::{Cli, Commands};
use catalyst::commands;
use catalyst::config::Settings;
use catalyst::{methods, modules};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` enables catalyst diagnostics without knowing target names.
    // `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 { "trace" } else { "debug" };
        for target in [
            "catalyst.methods",
            "catalyst.gpu",
            "catalyst.modules",
            "catalyst.pipeline",
        ] {
            if let Ok(parsed) = format!("{}={}", target, level).parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Load and validate settings
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load_from(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;
    settings
        .validate()
        .with_context(|| format!("invalid settings in {}", settings_path.display()))?;

    match &cli.command {
        Commands::Methods(args) => {
            let methods = methods::load_methods(&settings);
            commands::methods::execute(args, &methods, &cli.format)?;
        }
        Commands::Train(args) => {
            let report = modules::init();
            if !report.is_clean() {
                tracing::warn!(
                    target: "catalyst.modules",
                    failures = report.failures.len(),
                    "Some components are unavailable"
                );
            }
            let methods = methods::load_methods(&settings);
            commands::train::execute(args, &methods, &settings, &cli.format)
                .await
                .context("train failed")?;
        }
        Commands::Gpu(args) => {
            commands::gpu::execute(args, &settings, &cli.format).await?;
        }
        Commands::Modules(args) => {
            commands::modules::execute(args, &cli.format)?;
        }
        Commands::Settings(args) => {
            commands::settings::execute(args, &settings, &settings_path)?;
        }
    }

    Ok(())
}

fn print_error(message: &str) {
    let mut stderr = io::stderr();
    let _ = stderr.execute(SetForegroundColor(Color::Red));
    eprint!("error: ");
    let _ = stderr.execute(ResetColor);
    eprintln!("{}", message);
}
