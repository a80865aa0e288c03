// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Default built-in methods
//!
//! Only the Splatfacto family ships with the binary.

use std::collections::BTreeMap;

use crate::methods::catalog::MethodCatalog;
use crate::methods::schema::{
    ExponentialDecaySchedulerConfig, MethodSpec, OptimizerGroup, SplatfactoModelConfig,
    TrainerConfig,
};

const MAX_STEPS: u64 = 30000;

/// Get a built-in method by name
pub fn get_builtin(name: &str) -> Option<MethodSpec> {
    match name {
        "splatfacto" => Some(splatfacto()),
        "splatfacto-big" => Some(splatfacto_big()),
        "splatfacto-mcmc" => Some(splatfacto_mcmc()),
        _ => None,
    }
}

/// List all built-in method names
pub fn list_builtins() -> Vec<String> {
    vec![
        "splatfacto".to_string(),
        "splatfacto-big".to_string(),
        "splatfacto-mcmc".to_string(),
    ]
}

/// All built-in methods, in declaration order
pub fn builtin_methods() -> MethodCatalog {
    list_builtins()
        .iter()
        .filter_map(|name| get_builtin(name))
        .collect()
}

/// Trainer settings shared by every Splatfacto variant
pub fn splatfacto_trainer(model: SplatfactoModelConfig) -> TrainerConfig {
    let mut config = TrainerConfig::new("splatfacto");
    config.steps_per_eval_image = 100;
    config.steps_per_eval_batch = 0;
    config.steps_per_save = 2000;
    config.steps_per_eval_all_images = 1000;
    config.max_num_iterations = MAX_STEPS;
    config.mixed_precision = false;
    config.pipeline.model = model;
    config.optimizers = splatfacto_optimizers();
    config
}

fn splatfacto_optimizers() -> BTreeMap<String, OptimizerGroup> {
    let mut groups = BTreeMap::new();
    groups.insert(
        "means".to_string(),
        OptimizerGroup::adam(1.6e-4)
            .with_scheduler(ExponentialDecaySchedulerConfig::new(1.6e-6, MAX_STEPS)),
    );
    groups.insert("features_dc".to_string(), OptimizerGroup::adam(0.0025));
    groups.insert("features_rest".to_string(), OptimizerGroup::adam(0.0025 / 20.0));
    groups.insert("opacities".to_string(), OptimizerGroup::adam(0.05));
    groups.insert("scales".to_string(), OptimizerGroup::adam(0.005));
    groups.insert("quats".to_string(), OptimizerGroup::adam(0.001));
    groups.insert(
        "camera_opt".to_string(),
        OptimizerGroup::adam(1e-4).with_scheduler(
            ExponentialDecaySchedulerConfig::new(5e-7, MAX_STEPS).with_warmup(1000, 0.0),
        ),
    );
    groups.insert(
        "bilateral_grid".to_string(),
        OptimizerGroup::adam(2e-3).with_scheduler(
            ExponentialDecaySchedulerConfig::new(1e-4, MAX_STEPS).with_warmup(1000, 0.0),
        ),
    );
    groups
}

/// Splatfacto with default densification
fn splatfacto() -> MethodSpec {
    MethodSpec::new(
        "splatfacto",
        splatfacto_trainer(SplatfactoModelConfig::default()),
    )
    .with_description("Gaussian Splatting model")
}

/// Larger Splatfacto: culls and densifies more aggressively
fn splatfacto_big() -> MethodSpec {
    let model = SplatfactoModelConfig {
        cull_alpha_thresh: 0.005,
        densify_grad_thresh: 0.0005,
        ..SplatfactoModelConfig::default()
    };
    MethodSpec::new("splatfacto-big", splatfacto_trainer(model))
        .with_description("Larger version of Splatfacto with higher quality.")
}

/// Splatfacto with the MCMC densification strategy
fn splatfacto_mcmc() -> MethodSpec {
    let model = SplatfactoModelConfig {
        strategy: "mcmc".to_string(),
        cull_alpha_thresh: 0.005,
        stop_split_at: 25000,
        ..SplatfactoModelConfig::default()
    };
    MethodSpec::new("splatfacto-mcmc", splatfacto_trainer(model))
        .with_description("Splatfacto with MCMC densification strategy.")
}
