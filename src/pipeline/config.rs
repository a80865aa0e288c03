// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde::{Deserialize, Serialize};

use crate::config::PipelineSettings;
use crate::error::{CatalystError, Result};
use crate::methods::schema::{
    DataManagerConfig, EditingConfig, PipelineTarget, SplatfactoModelConfig, TrainerConfig,
};

/// Configuration of the editing pipeline.
///
/// The editing knobs are carried through to the loss hook; the stock
/// pipeline never reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreamCatalystPipelineConfig {
    #[serde(default)]
    pub datamanager: DataManagerConfig,
    #[serde(default)]
    pub model: SplatfactoModelConfig,
    #[serde(default)]
    pub editing: EditingConfig,
    #[serde(default = "default_log_every_steps")]
    pub log_every_steps: u64,
}

fn default_log_every_steps() -> u64 {
    PipelineSettings::default().log_every_steps
}

impl Default for DreamCatalystPipelineConfig {
    fn default() -> Self {
        Self {
            datamanager: DataManagerConfig::default(),
            model: SplatfactoModelConfig::default(),
            editing: EditingConfig::default(),
            log_every_steps: default_log_every_steps(),
        }
    }
}

impl DreamCatalystPipelineConfig {
    /// Extract the editing pipeline settings from a trainer preset.
    pub fn from_trainer(trainer: &TrainerConfig, settings: &PipelineSettings) -> Result<Self> {
        if trainer.pipeline.target != PipelineTarget::DreamCatalyst {
            return Err(CatalystError::Pipeline(format!(
                "method '{}' targets the {} pipeline",
                trainer.method_name, trainer.pipeline.target
            )));
        }

        let config = Self {
            datamanager: trainer.pipeline.datamanager.clone(),
            model: trainer.pipeline.model.clone(),
            editing: trainer.pipeline.editing.clone().unwrap_or_default(),
            log_every_steps: settings.log_every_steps,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.log_every_steps == 0 {
            return Err(CatalystError::Pipeline(
                "log_every_steps must be greater than zero".to_string(),
            ));
        }
        let knobs = [
            ("guidance_scale", self.editing.guidance_scale),
            ("image_guidance_scale", self.editing.image_guidance_scale),
            ("sds_loss_weight", self.editing.sds_loss_weight),
        ];
        for (name, value) in knobs {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalystError::Pipeline(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
