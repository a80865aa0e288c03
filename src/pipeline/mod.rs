// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Editing pipeline
//!
//! The external trainer drives a [`TrainPipeline`] one step at a time.
//! [`DreamCatalystPipeline`] wraps the stock Gaussian Splatting pipeline,
//! forwards every step to it and reports progress. Extra editing losses
//! plug in through [`EditingLoss`].

pub mod config;
pub mod dream;

pub use config::DreamCatalystPipelineConfig;
pub use dream::{DreamCatalystPipeline, EditingLoss, NoEditingLoss, EDITING_LOSS_KEY};

use std::collections::BTreeMap;

use crate::error::Result;

/// Result of one training step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutput {
    /// Rendered outputs, flattened (e.g. `rgb`)
    pub model_outputs: BTreeMap<String, Vec<f32>>,
    /// Named loss terms that are summed into the training objective
    pub loss_dict: BTreeMap<String, f64>,
    pub metrics_dict: BTreeMap<String, f64>,
}

impl StepOutput {
    /// Sum of all loss terms
    pub fn total_loss(&self) -> f64 {
        self.loss_dict.values().sum()
    }
}

/// A pipeline the trainer can step
pub trait TrainPipeline {
    /// Compute outputs, losses and metrics for `step`
    fn train_loss_dict(&mut self, step: u64) -> Result<StepOutput>;
}

impl<P: TrainPipeline + ?Sized> TrainPipeline for Box<P> {
    fn train_loss_dict(&mut self, step: u64) -> Result<StepOutput> {
        (**self).train_loss_dict(step)
    }
}
