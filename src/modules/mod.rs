// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Component registry
//!
//! Guidance, prompt-processor, data and system components are registered
//! under string keys and looked up by key. A composite key
//! `"base:mixin1,mixin2"` builds a component that keeps the identity of
//! `base` and layers the mixins on top of it.
//!
//! The process-wide registry is filled once by [`init`], which tolerates
//! failing units and reports them instead of aborting.

pub mod bundled;
pub mod init;
pub mod registry;

pub use bundled::ComponentDescriptor;
pub use init::{global_registry, init, InitFailure, InitReport};
pub use registry::{ComposedComponent, ModuleRegistry};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a component plays in an editing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Data,
    PromptProcessor,
    Guidance,
    System,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentKind::Data => "data",
            ComponentKind::PromptProcessor => "prompt-processor",
            ComponentKind::Guidance => "guidance",
            ComponentKind::System => "system",
        };
        f.write_str(s)
    }
}

/// A registered component
pub trait Component: Send + Sync + fmt::Debug {
    /// Registry key
    fn name(&self) -> &str;

    fn kind(&self) -> ComponentKind;

    /// Feature tags the component provides
    fn capabilities(&self) -> Vec<String>;

    /// Default options, as they would appear in a run configuration
    fn options(&self) -> toml::Table;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_display() {
        assert_eq!(ComponentKind::PromptProcessor.to_string(), "prompt-processor");
        assert_eq!(ComponentKind::Guidance.to_string(), "guidance");
    }

    #[test]
    fn test_component_kind_serde() {
        let json = serde_json::to_string(&ComponentKind::PromptProcessor).unwrap();
        assert_eq!(json, "\"prompt-processor\"");
        let kind: ComponentKind = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(kind, ComponentKind::System);
    }
}
