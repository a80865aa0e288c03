// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for catalyst
//!
//! Handles loading and saving settings from ~/.catalyst/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod io;
mod validation;

/// Main settings structure, stored in ~/.catalyst/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// GPU picker defaults
    #[serde(default)]
    pub gpu: GpuConfig,

    /// Method discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Editing pipeline settings
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// GPU picker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuConfig {
    /// Devices using at least this much memory (MiB) are not idle
    #[serde(default = "default_mem_threshold_mib")]
    pub mem_threshold_mib: u64,

    /// Devices at or above this utilization (%) are not idle
    #[serde(default = "default_util_threshold_pct")]
    pub util_threshold_pct: u32,

    /// Publish the chosen device through CUDA_VISIBLE_DEVICES
    #[serde(default = "default_true")]
    pub set_env: bool,

    /// Seconds to wait for the monitoring tool
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Monitoring tool binary
    #[serde(default = "default_smi_binary")]
    pub smi_binary: String,
}

/// Method discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Use the internal plugin registry before the manifest scan fallback
    #[serde(default = "default_true")]
    pub plugin_registry: bool,

    /// Additional directories searched for method manifests
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_dirs: Vec<PathBuf>,
}

/// Editing pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Log the reconstruction loss every N training steps
    #[serde(default = "default_log_every_steps")]
    pub log_every_steps: u64,
}

fn default_mem_threshold_mib() -> u64 {
    1000
}

fn default_util_threshold_pct() -> u32 {
    10
}

fn default_query_timeout_secs() -> u64 {
    10
}

fn default_smi_binary() -> String {
    "nvidia-smi".to_string()
}

fn default_log_every_steps() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            mem_threshold_mib: default_mem_threshold_mib(),
            util_threshold_pct: default_util_threshold_pct(),
            set_env: true,
            query_timeout_secs: default_query_timeout_secs(),
            smi_binary: default_smi_binary(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            plugin_registry: true,
            extra_dirs: Vec::new(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            log_every_steps: default_log_every_steps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.gpu.mem_threshold_mib, 1000);
        assert_eq!(settings.gpu.util_threshold_pct, 10);
        assert!(settings.gpu.set_env);
        assert!(settings.discovery.plugin_registry);
        assert_eq!(settings.pipeline.log_every_steps, 100);
    }

    #[test]
    fn test_gpu_config_default() {
        let gpu = GpuConfig::default();
        assert_eq!(gpu.smi_binary, "nvidia-smi");
        assert_eq!(gpu.query_timeout_secs, 10);
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.gpu.mem_threshold_mib, 1000);
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.gpu.mem_threshold_mib = 2048;
        settings.discovery.extra_dirs = vec![PathBuf::from("/opt/methods")];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.gpu.mem_threshold_mib, 2048);
        assert_eq!(loaded.discovery.extra_dirs, vec![PathBuf::from("/opt/methods")]);
    }

    #[test]
    fn test_settings_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("settings.json");

        Settings::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_settings_save_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"future": 1}"#).unwrap();

        Settings::default().save_to(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("future").is_none());
    }

    #[test]
    fn test_settings_partial_json() {
        let json = r#"{"gpu": {"util_threshold_pct": 25}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.gpu.util_threshold_pct, 25);
        assert_eq!(settings.gpu.mem_threshold_mib, 1000);
        assert!(settings.discovery.plugin_registry);
    }

    #[test]
    fn test_methods_dir_under_home() {
        let home = Settings::catalyst_home();
        assert!(Settings::methods_dir().starts_with(home));
    }

    #[test]
    fn test_default_path() {
        let path = Settings::default_path();
        assert!(path.to_string_lossy().ends_with("settings.json"));
    }
}
