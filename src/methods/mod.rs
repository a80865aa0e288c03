// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Training method registry
//!
//! Methods are named training presets exposed as `catalyst train <method>`.
//! The final mapping is assembled once at startup from three sources:
//! 1. Built-in presets (embedded in binary)
//! 2. Discovered extensions (may shadow built-ins of the same name)
//! 3. Placeholders for optional methods (never shadow anything real)
//!
//! The result is sorted by name and read-only afterwards.

pub mod builtin;
pub mod catalog;
pub mod discovery;
pub mod external;
pub mod manifest;
pub mod plugins;
pub mod schema;

pub use catalog::{merge_methods, sort_methods, MethodCatalog};
pub use discovery::{
    discover_methods, ManifestScanner, MethodPlugin, MethodSource, MethodSpecification,
    PluginRegistry,
};
pub use schema::{MethodConfig, MethodOrigin, MethodSpec, TrainerConfig};

use crate::config::Settings;

/// Build the final method mapping from already discovered methods.
pub fn assemble_methods(discovered: MethodCatalog) -> MethodCatalog {
    let methods = merge_methods(builtin::builtin_methods(), discovered, true);
    let methods = sort_methods(methods);
    let placeholders = sort_methods(external::external_methods());
    let methods = merge_methods(methods, placeholders, false);
    sort_methods(methods)
}

/// Discover extensions with the configured sources and assemble the mapping.
pub fn load_methods(settings: &Settings) -> MethodCatalog {
    let registry = PluginRegistry::from_settings(settings);
    let scanner = ManifestScanner::from_settings(settings);
    assemble_methods(discover_methods(&registry, &scanner))
}
