// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for catalyst
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for catalyst operations
#[derive(Error, Debug)]
pub enum CatalystError {
    /// GPU selection errors
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Method registry errors (unknown or placeholder methods)
    #[error("Method error: {0}")]
    Method(String),

    /// Plugin discovery errors
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Component registry errors
    #[error("Module error: {0}")]
    Module(String),

    /// Training pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Failures of the GPU picker.
///
/// Every variant is fatal: there is no fallback device.
#[derive(Error, Debug)]
pub enum GpuError {
    /// The monitoring tool is not installed or not on PATH
    #[error("monitoring tool not found: {0}")]
    ToolNotFound(String),

    /// The monitoring tool exited with a non-zero status
    #[error("monitoring tool failed ({status}): {stderr}")]
    ToolFailed { status: i32, stderr: String },

    /// The monitoring tool did not answer in time
    #[error("monitoring tool timed out after {0} seconds")]
    Timeout(u64),

    /// A telemetry row could not be parsed
    #[error("unparsable telemetry row '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// The monitoring tool reported zero devices
    #[error("no GPUs found via nvidia-smi")]
    NoDevices,
}

/// Result type alias for catalyst operations
pub type Result<T> = std::result::Result<T, CatalystError>;

impl From<toml::de::Error> for CatalystError {
    fn from(err: toml::de::Error) -> Self {
        CatalystError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalystError {
    fn from(err: toml::ser::Error) -> Self {
        CatalystError::Toml(err.to_string())
    }
}
