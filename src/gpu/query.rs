// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telemetry sources

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::telemetry::{QUERY_FIELDS, QUERY_FORMAT};
use crate::config::GpuConfig;
use crate::error::GpuError;

/// Produces one raw telemetry snapshot (`index, memory.used, utilization.gpu` rows)
#[async_trait]
pub trait GpuQuery: Send + Sync {
    async fn query(&self) -> Result<String, GpuError>;
}

/// Queries `nvidia-smi`
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    binary: String,
    timeout: Duration,
}

impl NvidiaSmi {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GpuConfig) -> Self {
        Self::new(
            config.smi_binary.clone(),
            Duration::from_secs(config.query_timeout_secs),
        )
    }

    /// Arguments passed to the monitoring tool
    pub fn args() -> [String; 2] {
        [
            format!("--query-gpu={}", QUERY_FIELDS),
            format!("--format={}", QUERY_FORMAT),
        ]
    }
}

impl Default for NvidiaSmi {
    fn default() -> Self {
        Self::from_config(&GpuConfig::default())
    }
}

#[async_trait]
impl GpuQuery for NvidiaSmi {
    async fn query(&self) -> Result<String, GpuError> {
        debug!(target: "catalyst.gpu", binary = %self.binary, "Querying GPU telemetry");

        let child = Command::new(&self.binary)
            .args(Self::args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GpuError::ToolNotFound(self.binary.clone()),
                _ => GpuError::ToolFailed {
                    status: -1,
                    stderr: format!("failed to spawn {}: {}", self.binary, e),
                },
            })?;

        // The child is killed when the timed-out future drops it.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(GpuError::ToolFailed {
                    status: -1,
                    stderr: e.to_string(),
                })
            }
            Err(_) => return Err(GpuError::Timeout(self.timeout.as_secs())),
        };

        if !output.status.success() {
            return Err(GpuError::ToolFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
