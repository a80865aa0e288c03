// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Plugins linked into the binary

use super::builtin::splatfacto_trainer;
use super::discovery::{MethodPlugin, MethodSpecification};
use super::schema::{EditingConfig, PipelineTarget, SplatfactoModelConfig};
use crate::error::Result;

pub const DREAM_CATALYST: &str = "dream-catalyst";

/// All plugins registered with the internal registry
pub fn bundled_plugins() -> Vec<Box<dyn MethodPlugin>> {
    vec![Box::new(DreamCatalystPlugin)]
}

/// Text-guided editing on top of Splatfacto
pub struct DreamCatalystPlugin;

impl MethodPlugin for DreamCatalystPlugin {
    fn name(&self) -> &str {
        DREAM_CATALYST
    }

    fn load(&self) -> Result<MethodSpecification> {
        let mut config = splatfacto_trainer(SplatfactoModelConfig::default());
        config.method_name = DREAM_CATALYST.to_string();
        config.pipeline.target = PipelineTarget::DreamCatalyst;
        config.pipeline.editing = Some(EditingConfig::default());

        Ok(MethodSpecification {
            config,
            description: "DreamCatalyst text-guided Gaussian Splatting editing".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_plugins() {
        let names: Vec<_> = bundled_plugins().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec![DREAM_CATALYST]);
    }

    #[test]
    fn test_dream_catalyst_targets_editing_pipeline() {
        let spec = DreamCatalystPlugin.load().unwrap();
        assert_eq!(spec.config.method_name, "dream-catalyst");
        assert_eq!(spec.config.pipeline.target, PipelineTarget::DreamCatalyst);
        let editing = spec.config.pipeline.editing.unwrap();
        assert!((editing.guidance_scale - 7.5).abs() < f64::EPSILON);
        assert!((editing.image_guidance_scale - 1.5).abs() < f64::EPSILON);
        assert_eq!(editing.ip2p_model_name, "timbrooks/instruct-pix2pix");
    }
}
