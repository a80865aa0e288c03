// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! GPU picker
//!
//! Picks the least loaded NVIDIA device before training and optionally
//! restricts the current process to it through `CUDA_VISIBLE_DEVICES`.
//! Every failure is fatal: there is no "device 0" fallback.

pub mod picker;
pub mod query;
pub mod telemetry;

pub use picker::{pick_idle_gpu, select_device, GpuSelection, PickerOptions, CUDA_VISIBLE_DEVICES};
pub use query::{GpuQuery, NvidiaSmi};
pub use telemetry::{parse_query_output, GpuSample, QUERY_FIELDS, QUERY_FORMAT};
