// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Method manifest parsing
//!
//! Installed extensions advertise methods with TOML manifests.
//!
//! # Example manifest (`~/.catalyst/methods/my-method.toml`)
//!
//! ```toml
//! group = "method_configs"
//! name = "my-method"
//! description = "Splatfacto with a longer schedule"
//!
//! [config]
//! method_name = "my-method"
//! max_num_iterations = 60000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::schema::{MethodOrigin, MethodSpec, TrainerConfig};
use crate::error::{CatalystError, Result};

/// Extension-point group that method manifests must declare.
pub const METHOD_GROUP: &str = "method_configs";

/// A method manifest on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodManifest {
    /// Extension-point group; manifests for other groups are ignored
    pub group: String,

    /// Method name (the CLI subcommand)
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Trainer preset
    pub config: TrainerConfig,

    /// Where the manifest was loaded from
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl MethodManifest {
    /// Parse a manifest from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::parse(&content).map_err(|e| {
            CatalystError::Discovery(format!(
                "Failed to parse method manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        manifest.source_path = Some(path.to_path_buf());
        Ok(manifest)
    }

    /// Parse a manifest from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: MethodManifest = toml::from_str(content)?;
        if manifest.name.trim().is_empty() {
            return Err(CatalystError::Discovery(
                "method manifest has an empty name".to_string(),
            ));
        }
        // The name becomes a `catalyst train` subcommand
        if manifest.name.starts_with('-') || manifest.name.chars().any(char::is_whitespace) {
            return Err(CatalystError::Discovery(format!(
                "method name '{}' cannot be used as a subcommand",
                manifest.name
            )));
        }
        Ok(manifest)
    }

    /// Whether this manifest belongs to the method extension point
    pub fn is_method_entry(&self) -> bool {
        self.group == METHOD_GROUP
    }

    /// Convert into a registry entry.
    pub fn into_spec(self) -> MethodSpec {
        let source = self
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| self.name.clone());
        MethodSpec::new(&self.name, self.config)
            .with_description(&self.description)
            .with_origin(MethodOrigin::Plugin { source })
    }
}

/// List `*.toml` files in a directory, sorted for deterministic ordering.
///
/// A missing directory yields an empty list; an unreadable one is an error.
pub fn list_manifests(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut manifests = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("toml") {
            manifests.push(path);
        }
    }

    manifests.sort();
    Ok(manifests)
}
