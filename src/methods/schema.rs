// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Method schema definition
//!
//! A method is a named training preset. The registry treats the payload as
//! opaque; only the `train` command and the external trainer read it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named training preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Unique name of the method (the CLI subcommand)
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Preset payload
    pub config: MethodConfig,

    /// Where the preset came from
    #[serde(default)]
    pub origin: MethodOrigin,
}

impl MethodSpec {
    /// Create a new built-in trainer preset
    pub fn new(name: &str, config: TrainerConfig) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            config: MethodConfig::Trainer(Box::new(config)),
            origin: MethodOrigin::Builtin,
        }
    }

    /// Create a placeholder for a method that is known but not installed
    pub fn placeholder(name: &str, instructions: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            config: MethodConfig::Placeholder(PlaceholderConfig {
                instructions: instructions.to_string(),
            }),
            origin: MethodOrigin::Placeholder,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the origin
    pub fn with_origin(mut self, origin: MethodOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Trainer configuration, if this is an installed method
    pub fn trainer(&self) -> Option<&TrainerConfig> {
        match &self.config {
            MethodConfig::Trainer(config) => Some(config.as_ref()),
            MethodConfig::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.config, MethodConfig::Placeholder(_))
    }
}

/// Where a method preset was declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodOrigin {
    /// Compiled into the binary
    #[default]
    Builtin,
    /// Found by discovery; `source` is the plugin name or manifest path
    Plugin { source: String },
    /// Advertised but not installed
    Placeholder,
}

impl fmt::Display for MethodOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodOrigin::Builtin => write!(f, "built-in"),
            MethodOrigin::Plugin { source } => write!(f, "plugin ({})", source),
            MethodOrigin::Placeholder => write!(f, "not installed"),
        }
    }
}

/// Opaque preset payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodConfig {
    Trainer(Box<TrainerConfig>),
    Placeholder(PlaceholderConfig),
}

/// Payload of a placeholder method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderConfig {
    /// What the user has to run to install the method
    pub instructions: String,
}

/// Trainer preset handed to the external training framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub method_name: String,
    #[serde(default = "default_steps_per_eval_image")]
    pub steps_per_eval_image: u64,
    #[serde(default)]
    pub steps_per_eval_batch: u64,
    #[serde(default = "default_steps_per_save")]
    pub steps_per_save: u64,
    #[serde(default = "default_steps_per_eval_all_images")]
    pub steps_per_eval_all_images: u64,
    #[serde(default = "default_max_num_iterations")]
    pub max_num_iterations: u64,
    #[serde(default)]
    pub mixed_precision: bool,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Optimizer settings per parameter group
    #[serde(default)]
    pub optimizers: BTreeMap<String, OptimizerGroup>,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default = "default_vis")]
    pub vis: String,
}

fn default_steps_per_eval_image() -> u64 {
    100
}

fn default_steps_per_save() -> u64 {
    2000
}

fn default_steps_per_eval_all_images() -> u64 {
    1000
}

fn default_max_num_iterations() -> u64 {
    30000
}

fn default_vis() -> String {
    "viewer".to_string()
}

impl TrainerConfig {
    /// Trainer defaults for the given method name
    pub fn new(method_name: &str) -> Self {
        Self {
            method_name: method_name.to_string(),
            steps_per_eval_image: default_steps_per_eval_image(),
            steps_per_eval_batch: 0,
            steps_per_save: default_steps_per_save(),
            steps_per_eval_all_images: default_steps_per_eval_all_images(),
            max_num_iterations: default_max_num_iterations(),
            mixed_precision: false,
            pipeline: PipelineConfig::default(),
            optimizers: BTreeMap::new(),
            viewer: ViewerConfig::default(),
            vis: default_vis(),
        }
    }
}

/// Which pipeline implementation the trainer instantiates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineTarget {
    #[default]
    Vanilla,
    DreamCatalyst,
}

impl fmt::Display for PipelineTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineTarget::Vanilla => write!(f, "vanilla"),
            PipelineTarget::DreamCatalyst => write!(f, "dream-catalyst"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub target: PipelineTarget,
    #[serde(default)]
    pub datamanager: DataManagerConfig,
    #[serde(default)]
    pub model: SplatfactoModelConfig,
    /// Editing knobs, only read by the editing pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing: Option<EditingConfig>,
}

/// Full-image datamanager settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataManagerConfig {
    #[serde(default)]
    pub dataparser: DataParserConfig,
    #[serde(default = "default_cache_images_type")]
    pub cache_images_type: String,
}

fn default_cache_images_type() -> String {
    "uint8".to_string()
}

impl Default for DataManagerConfig {
    fn default() -> Self {
        Self {
            dataparser: DataParserConfig::default(),
            cache_images_type: default_cache_images_type(),
        }
    }
}

/// Dataparsers the trainer can be pointed at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataParserKind {
    #[default]
    NerfstudioData,
    Colmap,
}

impl DataParserKind {
    pub const ALL: [DataParserKind; 2] = [DataParserKind::NerfstudioData, DataParserKind::Colmap];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataParserKind::NerfstudioData => "nerfstudio-data",
            DataParserKind::Colmap => "colmap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataParserConfig {
    #[serde(default)]
    pub kind: DataParserKind,
    #[serde(default = "default_true")]
    pub load_3d_points: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DataParserConfig {
    fn default() -> Self {
        Self {
            kind: DataParserKind::NerfstudioData,
            load_3d_points: true,
        }
    }
}

/// Splatfacto model settings that the presets override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplatfactoModelConfig {
    /// Densification strategy ("default" or "mcmc")
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_cull_alpha_thresh")]
    pub cull_alpha_thresh: f64,
    #[serde(default = "default_densify_grad_thresh")]
    pub densify_grad_thresh: f64,
    #[serde(default = "default_stop_split_at")]
    pub stop_split_at: u64,
    #[serde(default = "default_sh_degree")]
    pub sh_degree: u32,
    #[serde(default = "default_refine_every")]
    pub refine_every: u64,
}

fn default_strategy() -> String {
    "default".to_string()
}

fn default_cull_alpha_thresh() -> f64 {
    0.1
}

fn default_densify_grad_thresh() -> f64 {
    0.0008
}

fn default_stop_split_at() -> u64 {
    15000
}

fn default_sh_degree() -> u32 {
    3
}

fn default_refine_every() -> u64 {
    100
}

impl Default for SplatfactoModelConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            cull_alpha_thresh: default_cull_alpha_thresh(),
            densify_grad_thresh: default_densify_grad_thresh(),
            stop_split_at: default_stop_split_at(),
            sh_degree: default_sh_degree(),
            refine_every: default_refine_every(),
        }
    }
}

/// Text-guided editing knobs carried by the editing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingConfig {
    #[serde(default)]
    pub edit_prompt: String,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,
    #[serde(default = "default_image_guidance_scale")]
    pub image_guidance_scale: f64,
    #[serde(default = "default_sds_loss_weight")]
    pub sds_loss_weight: f64,
    #[serde(default = "default_ip2p_model_name")]
    pub ip2p_model_name: String,
}

fn default_guidance_scale() -> f64 {
    7.5
}

fn default_image_guidance_scale() -> f64 {
    1.5
}

fn default_sds_loss_weight() -> f64 {
    1.0
}

fn default_ip2p_model_name() -> String {
    "timbrooks/instruct-pix2pix".to_string()
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            edit_prompt: String::new(),
            guidance_scale: default_guidance_scale(),
            image_guidance_scale: default_image_guidance_scale(),
            sds_loss_weight: default_sds_loss_weight(),
            ip2p_model_name: default_ip2p_model_name(),
        }
    }
}

/// Optimizer and optional scheduler for one parameter group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerGroup {
    pub optimizer: AdamOptimizerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<ExponentialDecaySchedulerConfig>,
}

impl OptimizerGroup {
    pub fn adam(lr: f64) -> Self {
        Self {
            optimizer: AdamOptimizerConfig { lr, eps: 1e-15 },
            scheduler: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: ExponentialDecaySchedulerConfig) -> Self {
        self.scheduler = Some(scheduler);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdamOptimizerConfig {
    pub lr: f64,
    pub eps: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExponentialDecaySchedulerConfig {
    pub lr_final: f64,
    pub max_steps: u64,
    #[serde(default)]
    pub warmup_steps: u64,
    #[serde(default)]
    pub lr_pre_warmup: f64,
}

impl ExponentialDecaySchedulerConfig {
    pub fn new(lr_final: f64, max_steps: u64) -> Self {
        Self {
            lr_final,
            max_steps,
            warmup_steps: 0,
            lr_pre_warmup: 0.0,
        }
    }

    pub fn with_warmup(mut self, warmup_steps: u64, lr_pre_warmup: f64) -> Self {
        self.warmup_steps = warmup_steps;
        self.lr_pre_warmup = lr_pre_warmup;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default = "default_num_rays_per_chunk")]
    pub num_rays_per_chunk: u64,
}

fn default_num_rays_per_chunk() -> u64 {
    1 << 15
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            num_rays_per_chunk: default_num_rays_per_chunk(),
        }
    }
}
