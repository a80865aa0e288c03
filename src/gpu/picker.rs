// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Idle device selection

use serde::Serialize;
use tracing::{debug, info};

use super::query::GpuQuery;
use super::telemetry::{parse_query_output, GpuSample};
use crate::config::GpuConfig;
use crate::error::GpuError;

/// Environment variable read by CUDA to restrict visible devices
pub const CUDA_VISIBLE_DEVICES: &str = "CUDA_VISIBLE_DEVICES";

/// Thresholds and side effects for one pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub mem_threshold_mib: u64,
    pub util_threshold_pct: u32,
    pub set_env: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self::from_config(&GpuConfig::default())
    }
}

impl PickerOptions {
    pub fn from_config(config: &GpuConfig) -> Self {
        Self {
            mem_threshold_mib: config.mem_threshold_mib,
            util_threshold_pct: config.util_threshold_pct,
            set_env: config.set_env,
        }
    }
}

/// The device chosen by [`pick_idle_gpu`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GpuSelection {
    pub device: GpuSample,
    /// Whether `CUDA_VISIBLE_DEVICES` was set for this process
    pub published: bool,
}

impl GpuSelection {
    pub fn index(&self) -> u32 {
        self.device.index
    }

    /// Human-readable summary of the choice
    pub fn status_line(&self) -> String {
        let GpuSample {
            index,
            memory_used_mib,
            utilization_pct,
        } = self.device;
        if self.published {
            format!(
                "[auto-gpu] Picked GPU {index} (mem={memory_used_mib} MiB, util={utilization_pct}%) → {CUDA_VISIBLE_DEVICES}={index}"
            )
        } else {
            format!(
                "[auto-gpu] Best GPU appears to be {index} (mem={memory_used_mib} MiB, util={utilization_pct}%)"
            )
        }
    }
}

/// Choose the least loaded device.
///
/// Candidates are the idle devices, or every device when none is idle.
/// Among candidates the smallest `(memory, utilization)` wins; on a tie the
/// device reported first is kept.
pub fn select_device(samples: &[GpuSample], options: &PickerOptions) -> Result<GpuSample, GpuError> {
    if samples.is_empty() {
        return Err(GpuError::NoDevices);
    }

    let idle: Vec<&GpuSample> = samples
        .iter()
        .filter(|s| s.is_idle(options.mem_threshold_mib, options.util_threshold_pct))
        .collect();

    let candidates = if idle.is_empty() {
        debug!(
            target: "catalyst.gpu",
            devices = samples.len(),
            "No idle device, ranking all devices"
        );
        samples.iter().collect()
    } else {
        idle
    };

    // min_by_key returns the first of several equal minima.
    candidates
        .into_iter()
        .min_by_key(|s| (s.memory_used_mib, s.utilization_pct))
        .copied()
        .ok_or(GpuError::NoDevices)
}

/// Query telemetry, choose a device and optionally publish it.
///
/// The environment is only touched after a device has been chosen.
pub async fn pick_idle_gpu(
    query: &dyn GpuQuery,
    options: &PickerOptions,
) -> Result<GpuSelection, GpuError> {
    let output = query.query().await?;
    let samples = parse_query_output(&output)?;
    let device = select_device(&samples, options)?;

    if options.set_env {
        std::env::set_var(CUDA_VISIBLE_DEVICES, device.index.to_string());
    }

    let selection = GpuSelection {
        device,
        published: options.set_env,
    };
    info!(
        target: "catalyst.gpu",
        index = device.index,
        memory_used_mib = device.memory_used_mib,
        utilization_pct = device.utilization_pct,
        published = selection.published,
        "Selected GPU"
    );
    Ok(selection)
}
