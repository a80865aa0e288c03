// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! catalyst - tooling around text-guided Gaussian Splatting editing.
//!
//! This crate exposes the pieces used by the `catalyst` CLI (`src/main.rs`):
//! - `methods`: training-method registry (built-ins, discovered plugins, placeholders)
//! - `gpu`: idle GPU picker backed by `nvidia-smi`
//! - `modules`: component registry with composite keys and one-shot init
//! - `pipeline`: editing pipeline wrapper around the stock training pipeline
//! - `config`, `cli`, `commands`: settings, argument parsing and subcommands

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gpu;
pub mod methods;
pub mod modules;
pub mod pipeline;

pub use error::{CatalystError, GpuError, Result};
