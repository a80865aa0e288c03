// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Components shipped with catalyst
//!
//! These are descriptors: a name, a kind, capability tags and the default
//! options a run configuration would carry. The heavy lifting (diffusion
//! models, renderers) lives in the external frameworks.

use std::sync::Arc;

use super::{Component, ComponentKind};

/// A static component description
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    name: String,
    kind: ComponentKind,
    capabilities: Vec<String>,
    options: toml::Table,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: ComponentKind,
        capabilities: &[&str],
        options: toml::Table,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
            options,
        }
    }
}

impl Component for ComponentDescriptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn capabilities(&self) -> Vec<String> {
        self.capabilities.clone()
    }

    fn options(&self) -> toml::Table {
        self.options.clone()
    }
}

fn table<const N: usize>(entries: [(&str, toml::Value); N]) -> toml::Table {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

fn float_pair(a: f64, b: f64) -> toml::Value {
    toml::Value::Array(vec![a.into(), b.into()])
}

fn component(
    name: &str,
    kind: ComponentKind,
    capabilities: &[&str],
    options: toml::Table,
) -> Arc<dyn Component> {
    Arc::new(ComponentDescriptor::new(name, kind, capabilities, options))
}

pub fn multiview_camera_datamodule() -> Arc<dyn Component> {
    component(
        "multiview-camera-datamodule",
        ComponentKind::Data,
        &["camera-poses", "multiview-images"],
        table([
            ("dataroot", "".into()),
            ("train_downsample_resolution", 4.into()),
            ("eval_downsample_resolution", 4.into()),
            ("train_data_interval", 1.into()),
            ("eval_data_interval", 2.into()),
            ("batch_size", 1.into()),
            ("camera_layout", "around".into()),
        ]),
    )
}

pub fn random_camera_datamodule() -> Arc<dyn Component> {
    component(
        "random-camera-datamodule",
        ComponentKind::Data,
        &["camera-poses", "random-views"],
        table([
            ("height", 64.into()),
            ("width", 64.into()),
            ("batch_size", 1.into()),
            ("elevation_range", float_pair(-10.0, 90.0)),
            ("azimuth_range", float_pair(-180.0, 180.0)),
            ("camera_distance_range", float_pair(1.0, 1.5)),
            ("fovy_range", float_pair(40.0, 70.0)),
        ]),
    )
}

pub fn stable_diffusion_prompt_processor() -> Arc<dyn Component> {
    component(
        "stable-diffusion-prompt-processor",
        ComponentKind::PromptProcessor,
        &["text-embeddings", "view-dependent-prompting"],
        table([
            ("pretrained_model_name_or_path", "runwayml/stable-diffusion-v1-5".into()),
            ("prompt", "a hamburger".into()),
            ("negative_prompt", "".into()),
            ("use_perp_neg", false.into()),
            ("spawn", true.into()),
        ]),
    )
}

pub fn stable_diffusion_guidance() -> Arc<dyn Component> {
    component(
        "stable-diffusion-guidance",
        ComponentKind::Guidance,
        &["score-distillation"],
        table([
            ("pretrained_model_name_or_path", "runwayml/stable-diffusion-v1-5".into()),
            ("guidance_scale", 100.0.into()),
            ("half_precision_weights", true.into()),
            ("min_step_percent", 0.02.into()),
            ("max_step_percent", 0.98.into()),
            ("weighting_strategy", "sds".into()),
        ]),
    )
}

pub fn instructpix2pix_guidance() -> Arc<dyn Component> {
    component(
        "stable-diffusion-instructpix2pix-guidance",
        ComponentKind::Guidance,
        &["image-conditioning", "instruction-editing"],
        table([
            ("ip2p_name_or_path", "timbrooks/instruct-pix2pix".into()),
            ("guidance_scale", 7.5.into()),
            ("condition_scale", 1.5.into()),
            ("half_precision_weights", true.into()),
            ("min_step_percent", 0.02.into()),
            ("max_step_percent", 0.98.into()),
            ("diffusion_steps", 20.into()),
        ]),
    )
}

pub fn stable_diffusion_sdi_guidance() -> Arc<dyn Component> {
    component(
        "stable-diffusion-sdi-guidance",
        ComponentKind::Guidance,
        &["score-distillation", "score-inversion"],
        table([
            ("pretrained_model_name_or_path", "runwayml/stable-diffusion-v1-5".into()),
            ("guidance_scale", 7.5.into()),
            ("half_precision_weights", true.into()),
            ("enable_sdi", true.into()),
            ("inversion_guidance_scale", (-7.5).into()),
            ("inversion_n_steps", 10.into()),
            ("inversion_eta", 0.3.into()),
        ]),
    )
}

pub fn dreamfusion_system() -> Arc<dyn Component> {
    component(
        "dreamfusion-system",
        ComponentKind::System,
        &["text-to-3d"],
        table([
            ("lambda_sds", 1.0.into()),
            ("lambda_orient", 0.0.into()),
            ("lambda_sparsity", 0.0.into()),
            ("lambda_opaque", 0.0.into()),
        ]),
    )
}

pub fn instructnerf2nerf_system() -> Arc<dyn Component> {
    component(
        "instructnerf2nerf-system",
        ComponentKind::System,
        &["scene-editing", "dataset-update"],
        table([
            ("per_editing_step", 10.into()),
            ("start_editing_step", 1000.into()),
            ("lambda_l1", 10.0.into()),
            ("lambda_p", 10.0.into()),
        ]),
    )
}

pub fn sdi_system() -> Arc<dyn Component> {
    component(
        "sdi-system",
        ComponentKind::System,
        &["text-to-3d", "score-inversion"],
        table([
            ("lambda_sds", 1.0.into()),
            ("lambda_orient", 0.0.into()),
            ("lambda_sparsity", 0.0.into()),
        ]),
    )
}
