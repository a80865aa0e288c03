// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Placeholders for optional methods that are not installed
//!
//! They are merged without overwrite, so an installed method of the same
//! name always wins and the placeholder only shows install guidance.

use super::catalog::MethodCatalog;
use super::schema::MethodSpec;

struct ExternalMethod {
    name: &'static str,
    description: &'static str,
    instructions: &'static str,
}

const EXTERNAL_METHODS: &[ExternalMethod] = &[
    ExternalMethod {
        name: "dream-catalyst",
        description: "[External] DreamCatalyst text-guided Gaussian Splatting editing",
        instructions: "DreamCatalyst\n\
            Fast and high-quality 3D editing via controlling editability and identity preservation.\n\n\
            Enable the plugin registry (discovery.plugin_registry = true in settings.json)\n\
            or install a method manifest into ~/.catalyst/methods/dream-catalyst.toml",
    },
    ExternalMethod {
        name: "igs2gs",
        description: "[External] Instruct-GS2GS. Gaussian Splatting editing with instructions",
        instructions: "Instruct-GS2GS\n\
            Editing Gaussian Splatting scenes with instructions.\n\n\
            To enable Instruct-GS2GS, you must install it first by running:\n  \
            pip install git+https://github.com/cvachha/instruct-gs2gs",
    },
    ExternalMethod {
        name: "in2n",
        description: "[External] Instruct-NeRF2NeRF. Full model, used in paper",
        instructions: "Instruct-NeRF2NeRF\n\
            Editing 3D scenes with instructions.\n\n\
            To enable Instruct-NeRF2NeRF, you must install it first by running:\n  \
            pip install git+https://github.com/ayaanzhaque/instruct-nerf2nerf",
    },
    ExternalMethod {
        name: "in2n-small",
        description: "[External] Instruct-NeRF2NeRF. Half precision model",
        instructions: "Instruct-NeRF2NeRF (half precision)\n\n\
            To enable Instruct-NeRF2NeRF, you must install it first by running:\n  \
            pip install git+https://github.com/ayaanzhaque/instruct-nerf2nerf",
    },
    ExternalMethod {
        name: "in2n-tiny",
        description: "[External] Instruct-NeRF2NeRF. Half precision with no LPIPS",
        instructions: "Instruct-NeRF2NeRF (half precision, no LPIPS)\n\n\
            To enable Instruct-NeRF2NeRF, you must install it first by running:\n  \
            pip install git+https://github.com/ayaanzhaque/instruct-nerf2nerf",
    },
];

/// Placeholder entries for every known optional method
pub fn external_methods() -> MethodCatalog {
    EXTERNAL_METHODS
        .iter()
        .map(|m| MethodSpec::placeholder(m.name, m.instructions).with_description(m.description))
        .collect()
}
