// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Method discovery
//!
//! Discovery asks the internal plugin registry first. When the registry is
//! unavailable it falls back to a plain scan of installed method manifests.
//! A broken extension never blocks the others: per-entry failures are logged
//! and skipped, and a failed mechanism degrades to "no methods found".

use std::path::PathBuf;

use tracing::{debug, warn};

use super::catalog::MethodCatalog;
use super::manifest::{list_manifests, MethodManifest};
use super::plugins::bundled_plugins;
use super::schema::{MethodOrigin, MethodSpec, TrainerConfig};
use crate::config::Settings;
use crate::error::{CatalystError, Result};

/// What a loaded extension entry exposes: a preset and its description.
#[derive(Debug, Clone)]
pub struct MethodSpecification {
    pub config: TrainerConfig,
    pub description: String,
}

/// A statically linked method extension
pub trait MethodPlugin: Send + Sync {
    /// Name the method is registered under
    fn name(&self) -> &str;

    /// Build the method specification
    fn load(&self) -> Result<MethodSpecification>;
}

/// A source of discovered methods
pub trait MethodSource {
    fn name(&self) -> &str;

    /// Discover methods; an error means the whole source is unavailable.
    fn discover(&self) -> Result<MethodCatalog>;
}

/// Internal plugin registry: linked plugins plus installed manifests.
pub struct PluginRegistry {
    enabled: bool,
    plugins: Vec<Box<dyn MethodPlugin>>,
    search_dirs: Vec<PathBuf>,
}

impl PluginRegistry {
    /// Registry with the bundled plugins and the configured search paths.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            enabled: settings.discovery.plugin_registry,
            plugins: bundled_plugins(),
            search_dirs: settings.method_search_dirs(),
        }
    }

    /// Registry with explicit plugins and directories (for testing)
    pub fn with_parts(plugins: Vec<Box<dyn MethodPlugin>>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            enabled: true,
            plugins,
            search_dirs,
        }
    }

    /// Disable the registry so discovery falls back to the manifest scan
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            plugins: Vec::new(),
            search_dirs: Vec::new(),
        }
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }
}

impl MethodSource for PluginRegistry {
    fn name(&self) -> &str {
        "plugin registry"
    }

    fn discover(&self) -> Result<MethodCatalog> {
        if !self.enabled {
            return Err(CatalystError::Discovery(
                "plugin registry is disabled".to_string(),
            ));
        }

        let mut batch = DiscoveryBatch::default();

        for plugin in &self.plugins {
            match plugin.load() {
                Ok(spec) => batch.add(
                    MethodSpec::new(plugin.name(), spec.config)
                        .with_description(&spec.description)
                        .with_origin(MethodOrigin::Plugin {
                            source: plugin.name().to_string(),
                        }),
                ),
                Err(e) => warn!(
                    target: "catalyst.methods",
                    plugin = plugin.name(),
                    "Failed to load method plugin: {}",
                    e
                ),
            }
        }

        for dir in &self.search_dirs {
            let paths = list_manifests(dir).map_err(|e| {
                CatalystError::Discovery(format!("cannot read {}: {}", dir.display(), e))
            })?;
            batch.load_manifests(paths);
        }

        Ok(batch.into_catalog())
    }
}

/// Fallback source: a lenient scan of manifest directories.
pub struct ManifestScanner {
    search_dirs: Vec<PathBuf>,
}

impl ManifestScanner {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.method_search_dirs())
    }
}

impl MethodSource for ManifestScanner {
    fn name(&self) -> &str {
        "manifest scan"
    }

    fn discover(&self) -> Result<MethodCatalog> {
        let mut batch = DiscoveryBatch::default();

        for dir in &self.search_dirs {
            match list_manifests(dir) {
                Ok(paths) => batch.load_manifests(paths),
                Err(e) => warn!(
                    target: "catalyst.methods",
                    "Skipping method directory {}: {}",
                    dir.display(),
                    e
                ),
            }
        }

        Ok(batch.into_catalog())
    }
}

/// Entries collected by one discovery run.
#[derive(Default)]
struct DiscoveryBatch {
    catalog: MethodCatalog,
}

impl DiscoveryBatch {
    /// Duplicate names inside a batch are last-write-wins.
    fn add(&mut self, spec: MethodSpec) {
        let name = spec.name.clone();
        if let Some(previous) = self.catalog.insert(spec) {
            debug!(
                target: "catalyst.methods",
                method = %name,
                shadowed = %previous.origin,
                "Duplicate method in discovery batch, keeping the later entry"
            );
        }
    }

    fn load_manifests(&mut self, paths: Vec<PathBuf>) {
        for path in paths {
            match MethodManifest::from_file(&path) {
                Ok(manifest) if manifest.is_method_entry() => self.add(manifest.into_spec()),
                Ok(manifest) => debug!(
                    target: "catalyst.methods",
                    "Ignoring {} (group '{}')",
                    path.display(),
                    manifest.group
                ),
                Err(e) => warn!(
                    target: "catalyst.methods",
                    "Failed to load method manifest {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }

    fn into_catalog(self) -> MethodCatalog {
        self.catalog
    }
}

/// Discover extension methods, preferring `primary` and falling back.
///
/// Never fails: an unavailable mechanism yields an empty catalog.
pub fn discover_methods(primary: &dyn MethodSource, fallback: &dyn MethodSource) -> MethodCatalog {
    match primary.discover() {
        Ok(found) => {
            debug!(
                target: "catalyst.methods",
                source = primary.name(),
                count = found.len(),
                "Discovered methods"
            );
            return found;
        }
        Err(e) => debug!(
            target: "catalyst.methods",
            "{} unavailable ({}), falling back to {}",
            primary.name(),
            e,
            fallback.name()
        ),
    }

    match fallback.discover() {
        Ok(found) => found,
        Err(e) => {
            warn!(target: "catalyst.methods", "Method discovery failed: {}", e);
            MethodCatalog::new()
        }
    }
}
