// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! The static surface is derived here. Per-method `train` subcommands are
//! only known after discovery and are built at runtime in
//! [`crate::commands::train`].

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// catalyst - text-guided Gaussian Splatting editing toolkit
#[derive(Parser, Debug)]
#[command(name = "catalyst")]
#[command(
    version,
    about = "Method registry, component registry and GPU picker for text-guided 3D editing"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (defaults to ~/.catalyst/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and inspect training methods
    Methods(MethodsArgs),

    /// Resolve a training method's configuration
    ///
    /// Run `catalyst train` for the available methods and
    /// `catalyst train <method> --help` for its flags.
    #[command(disable_help_subcommand = true)]
    Train(TrainArgs),

    /// Pick an idle GPU
    Gpu(GpuArgs),

    /// Inspect the component registry
    Modules(ModulesArgs),

    /// Manage settings
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the methods subcommand
#[derive(clap::Args, Debug)]
pub struct MethodsArgs {
    #[command(subcommand)]
    pub command: MethodsCommands,
}

#[derive(Subcommand, Debug)]
pub enum MethodsCommands {
    /// List every available method
    List {
        /// Show origin and pipeline target
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show one method's configuration
    Show {
        /// Method name
        name: String,
    },
}

/// Arguments for the train subcommand
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    #[command(subcommand)]
    pub method: Option<TrainMethod>,
}

/// Method names are only known after discovery, so `<method> [flags]` is
/// captured raw and parsed again against the method table.
#[derive(Subcommand, Debug)]
pub enum TrainMethod {
    #[command(external_subcommand)]
    Method(Vec<String>),
}

impl TrainArgs {
    /// `<method> [flags]`, or empty when no method was given
    pub fn raw(&self) -> &[String] {
        match &self.method {
            Some(TrainMethod::Method(args)) => args,
            None => &[],
        }
    }
}

/// Arguments for the gpu subcommand
#[derive(clap::Args, Debug)]
pub struct GpuArgs {
    #[command(subcommand)]
    pub command: GpuCommands,
}

#[derive(Subcommand, Debug)]
pub enum GpuCommands {
    /// Choose the least loaded GPU
    Pick(GpuPickArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct GpuPickArgs {
    /// Devices using at least this much memory (MiB) are busy
    #[arg(long, value_name = "MIB")]
    pub mem_threshold: Option<u64>,

    /// Devices at or above this utilization (%) are busy
    #[arg(long, value_name = "PCT", value_parser = clap::value_parser!(u32).range(0..=100))]
    pub util_threshold: Option<u32>,

    /// Do not set CUDA_VISIBLE_DEVICES
    #[arg(long)]
    pub no_set_env: bool,

    /// Seconds to wait for nvidia-smi
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print `export CUDA_VISIBLE_DEVICES=<n>` for shell eval
    #[arg(long)]
    pub export: bool,
}

/// Arguments for the modules subcommand
#[derive(clap::Args, Debug)]
pub struct ModulesArgs {
    #[command(subcommand)]
    pub command: ModulesCommands,
}

#[derive(Subcommand, Debug)]
pub enum ModulesCommands {
    /// List registered components and initialisation failures
    List,

    /// Look up a component, e.g. `base:mixin1,mixin2`
    Find {
        /// Component key
        key: String,
    },
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the effective settings
    Show,

    /// Print the settings file path
    Path,

    /// Write default settings and create directories
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
