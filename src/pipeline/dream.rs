// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use tracing::{debug, info};

use super::config::DreamCatalystPipelineConfig;
use super::{StepOutput, TrainPipeline};
use crate::error::Result;
use crate::methods::schema::EditingConfig;

/// Loss key under which the editing term is added
pub const EDITING_LOSS_KEY: &str = "sds_loss";

/// Extra loss term computed from the rendered step outputs
pub trait EditingLoss {
    /// Unweighted loss for `step`, or `None` to add nothing
    fn compute(&mut self, step: u64, output: &StepOutput, editing: &EditingConfig)
        -> Result<Option<f64>>;
}

/// The default hook: contributes no loss
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEditingLoss;

impl EditingLoss for NoEditingLoss {
    fn compute(&mut self, _: u64, _: &StepOutput, _: &EditingConfig) -> Result<Option<f64>> {
        Ok(None)
    }
}

/// Gaussian Splatting pipeline with a text-guided editing hook
pub struct DreamCatalystPipeline<P, L = NoEditingLoss> {
    config: DreamCatalystPipelineConfig,
    parent: P,
    editing_loss: L,
}

impl<P: TrainPipeline> DreamCatalystPipeline<P> {
    pub fn new(config: DreamCatalystPipelineConfig, parent: P) -> Self {
        Self::with_editing_loss(config, parent, NoEditingLoss)
    }
}

impl<P: TrainPipeline, L: EditingLoss> DreamCatalystPipeline<P, L> {
    pub fn with_editing_loss(config: DreamCatalystPipelineConfig, parent: P, editing_loss: L) -> Self {
        info!(
            target: "catalyst.pipeline",
            edit_prompt = %config.editing.edit_prompt,
            "DreamCatalyst pipeline initialised (Gaussian Splatting mode)"
        );
        Self {
            config,
            parent,
            editing_loss,
        }
    }

    pub fn config(&self) -> &DreamCatalystPipelineConfig {
        &self.config
    }

    pub fn parent(&self) -> &P {
        &self.parent
    }

    /// Whether progress is reported at `step`
    pub fn reports_at(&self, step: u64) -> bool {
        step % self.config.log_every_steps.max(1) == 0
    }
}

impl<P: TrainPipeline, L: EditingLoss> TrainPipeline for DreamCatalystPipeline<P, L> {
    fn train_loss_dict(&mut self, step: u64) -> Result<StepOutput> {
        let mut output = self.parent.train_loss_dict(step)?;

        if self.reports_at(step) {
            info!(
                target: "catalyst.pipeline",
                step,
                recon_loss = %format!("{:.4}", output.total_loss()),
                "Training step"
            );
        }

        if let Some(loss) = self
            .editing_loss
            .compute(step, &output, &self.config.editing)?
        {
            let weighted = self.config.editing.sds_loss_weight * loss;
            debug!(target: "catalyst.pipeline", step, loss = weighted, "Editing loss");
            output.loss_dict.insert(EDITING_LOSS_KEY.to_string(), weighted);
        }

        Ok(output)
    }
}
