// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use catalyst::config::Settings;
use catalyst::gpu::{NvidiaSmi, PickerOptions};
use tempfile::TempDir;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();
    assert_eq!(settings.gpu.mem_threshold_mib, 1000);
    assert_eq!(settings.gpu.util_threshold_pct, 10);
    assert!(settings.gpu.set_env);
    assert_eq!(settings.gpu.smi_binary, "nvidia-smi");
    assert!(settings.discovery.plugin_registry);
    assert!(settings.discovery.extra_dirs.is_empty());
    assert_eq!(settings.pipeline.log_every_steps, 100);
}

#[test]
fn test_settings_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{"gpu": {"util_threshold_pct": 25}}"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.gpu.util_threshold_pct, 25);
    assert_eq!(settings.gpu.mem_threshold_mib, 1000);
    assert_eq!(settings.pipeline.log_every_steps, 100);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_invalid_json_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load_from(&path).is_err());
}

#[test]
fn test_settings_validation_rejects_bad_values() {
    let mut settings = Settings::default();
    settings.gpu.util_threshold_pct = 101;
    assert!(settings.validate().is_err());

    let mut settings = Settings::default();
    settings.gpu.query_timeout_secs = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_feed_gpu_picker() {
    let mut settings = Settings::default();
    settings.gpu.mem_threshold_mib = 512;
    settings.gpu.set_env = false;

    let options = PickerOptions::from_config(&settings.gpu);
    assert_eq!(options.mem_threshold_mib, 512);
    assert!(!options.set_env);

    // Constructing the query never runs the tool.
    let _ = NvidiaSmi::from_config(&settings.gpu);
}

#[test]
fn test_extra_dirs_are_searched() {
    let mut settings = Settings::default();
    settings.discovery.extra_dirs = vec!["/opt/catalyst/methods".into()];
    let dirs = settings.method_search_dirs();
    assert_eq!(dirs[0], Settings::methods_dir());
    assert!(dirs.contains(&"/opt/catalyst/methods".into()));
}
