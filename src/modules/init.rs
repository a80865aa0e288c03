// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! One-shot registry initialisation
//!
//! Units run in dependency order. A unit that fails is logged and recorded,
//! and any unit that depends on it is skipped. Nothing is propagated.

use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, warn};

use super::bundled;
use super::registry::ModuleRegistry;
use crate::error::{CatalystError, Result};

/// One initialisation step
pub struct InitUnit {
    pub name: &'static str,
    /// Units that must have succeeded before this one runs
    pub requires: &'static [&'static str],
    pub run: fn(&mut ModuleRegistry) -> Result<()>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitFailure {
    pub unit: String,
    pub reason: String,
}

/// Outcome of [`init`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    pub loaded: Vec<String>,
    pub failures: Vec<InitFailure>,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn has_loaded(&self, unit: &str) -> bool {
        self.loaded.iter().any(|u| u == unit)
    }
}

// Data, prompt processor base, guidance, concrete prompt processors, systems.
const BUNDLED_UNITS: &[InitUnit] = &[
    InitUnit {
        name: "data.multiview",
        requires: &[],
        run: |r| r.register(bundled::multiview_camera_datamodule()),
    },
    InitUnit {
        name: "data.uncond",
        requires: &[],
        run: |r| r.register(bundled::random_camera_datamodule()),
    },
    InitUnit {
        name: "prompt_processors.base",
        requires: &[],
        run: |_| Ok(()),
    },
    InitUnit {
        name: "guidance.instructpix2pix",
        requires: &["prompt_processors.base"],
        run: |r| r.register(bundled::instructpix2pix_guidance()),
    },
    InitUnit {
        name: "guidance.stable_diffusion",
        requires: &["prompt_processors.base"],
        run: |r| r.register(bundled::stable_diffusion_guidance()),
    },
    InitUnit {
        name: "guidance.stable_diffusion_sdi",
        requires: &["prompt_processors.base"],
        run: |r| r.register(bundled::stable_diffusion_sdi_guidance()),
    },
    InitUnit {
        name: "prompt_processors.stable_diffusion",
        requires: &["prompt_processors.base"],
        run: |r| r.register(bundled::stable_diffusion_prompt_processor()),
    },
    InitUnit {
        name: "systems.dreamfusion",
        requires: &["guidance.stable_diffusion", "prompt_processors.stable_diffusion"],
        run: |r| r.register(bundled::dreamfusion_system()),
    },
    InitUnit {
        name: "systems.instructnerf2nerf",
        requires: &["guidance.instructpix2pix", "prompt_processors.stable_diffusion"],
        run: |r| r.register(bundled::instructnerf2nerf_system()),
    },
    InitUnit {
        name: "systems.sdi",
        requires: &["guidance.stable_diffusion_sdi", "prompt_processors.stable_diffusion"],
        run: |r| r.register(bundled::sdi_system()),
    },
];

/// Bundled units in the order [`init`] runs them
pub fn bundled_units() -> &'static [InitUnit] {
    BUNDLED_UNITS
}

/// Run `units` in order against a fresh registry.
pub fn initialize(units: &[InitUnit]) -> (ModuleRegistry, InitReport) {
    let mut registry = ModuleRegistry::new();
    let mut report = InitReport::default();

    for unit in units {
        let outcome = match unit.requires.iter().find(|dep| !report.has_loaded(dep)) {
            Some(dep) => Err(CatalystError::Module(format!("dependency '{}' unavailable", dep))),
            None => (unit.run)(&mut registry),
        };

        match outcome {
            Ok(()) => {
                debug!(target: "catalyst.modules", unit = unit.name, "Initialised unit");
                report.loaded.push(unit.name.to_string());
            }
            Err(e) => {
                warn!(target: "catalyst.modules", unit = unit.name, error = %e, "Could not initialise unit");
                report.failures.push(InitFailure {
                    unit: unit.name.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (registry, report)
}

static GLOBAL: OnceLock<(ModuleRegistry, InitReport)> = OnceLock::new();

fn global() -> &'static (ModuleRegistry, InitReport) {
    GLOBAL.get_or_init(|| initialize(BUNDLED_UNITS))
}

/// Initialise the process-wide registry once; later calls return the same report.
pub fn init() -> &'static InitReport {
    &global().1
}

/// The process-wide registry, initialised on first use
pub fn global_registry() -> &'static ModuleRegistry {
    &global().0
}
