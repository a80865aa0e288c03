// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Built-in methods
//!
//! These presets are compiled into the binary and always available.

mod defaults;

pub use defaults::{builtin_methods, get_builtin, list_builtins, splatfacto_trainer};
