// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use crate::error::{CatalystError, Result};

use super::Settings;

impl Settings {
    /// Reject settings the picker or pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.gpu.util_threshold_pct > 100 {
            return Err(CatalystError::Config(format!(
                "gpu.util_threshold_pct must be at most 100, got {}",
                self.gpu.util_threshold_pct
            )));
        }
        if self.gpu.query_timeout_secs == 0 {
            return Err(CatalystError::Config(
                "gpu.query_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.gpu.smi_binary.trim().is_empty() {
            return Err(CatalystError::Config(
                "gpu.smi_binary must not be empty".to_string(),
            ));
        }
        if self.pipeline.log_every_steps == 0 {
            return Err(CatalystError::Config(
                "pipeline.log_every_steps must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Directories searched for method manifests, highest priority last.
    ///
    /// Later directories win on name collisions inside one discovery batch.
    pub fn method_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![Self::methods_dir()];
        dirs.extend(self.discovery.extra_dirs.iter().cloned());
        if let Some(project) = Self::project_methods_dir() {
            dirs.push(project);
        }
        dirs
    }
}
