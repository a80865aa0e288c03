// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations
//!
//! Each module renders to plain text or JSON according to the global
//! `--format` flag. Diagnostics go through `tracing`, results to stdout.

pub mod gpu;
pub mod methods;
pub mod modules;
pub mod settings;
pub mod train;
