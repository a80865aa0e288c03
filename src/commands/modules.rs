// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Component registry commands

use std::sync::Arc;

use serde::Serialize;

use crate::cli::args::{ModulesArgs, ModulesCommands, OutputFormat};
use crate::error::Result;
use crate::modules::{self, Component, ComponentKind, InitReport, ModuleRegistry};

#[derive(Serialize)]
struct ComponentInfo {
    name: String,
    kind: ComponentKind,
    capabilities: Vec<String>,
    options: toml::Table,
}

impl From<&Arc<dyn Component>> for ComponentInfo {
    fn from(component: &Arc<dyn Component>) -> Self {
        Self {
            name: component.name().to_string(),
            kind: component.kind(),
            capabilities: component.capabilities(),
            options: component.options(),
        }
    }
}

#[derive(Serialize)]
struct RegistryInfo<'a> {
    components: Vec<ComponentInfo>,
    init: &'a InitReport,
}

/// Execute the modules command
pub fn execute(args: &ModulesArgs, format: &OutputFormat) -> Result<()> {
    let report = modules::init();
    let registry = modules::global_registry();

    let output = match (&args.command, format) {
        (ModulesCommands::List, OutputFormat::Json) => serde_json::to_string_pretty(&RegistryInfo {
            components: registry.iter().map(ComponentInfo::from).collect(),
            init: report,
        })?,
        (ModulesCommands::List, OutputFormat::Text) => render_list(registry, report),
        (ModulesCommands::Find { key }, OutputFormat::Json) => {
            serde_json::to_string_pretty(&ComponentInfo::from(&registry.find(key)?))?
        }
        (ModulesCommands::Find { key }, OutputFormat::Text) => render_component(key, &registry.find(key)?)?,
    };
    println!("{}", output);
    Ok(())
}

/// Components grouped by kind, then initialisation failures
pub fn render_list(registry: &ModuleRegistry, report: &InitReport) -> String {
    let mut out = String::new();
    for kind in [
        ComponentKind::Data,
        ComponentKind::PromptProcessor,
        ComponentKind::Guidance,
        ComponentKind::System,
    ] {
        let components = registry.by_kind(kind);
        if components.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", kind));
        for component in components {
            out.push_str(&format!(
                "  {}  [{}]\n",
                component.name(),
                component.capabilities().join(", ")
            ));
        }
    }
    if !report.is_clean() {
        out.push_str("\nFailed to initialise:\n");
        for failure in &report.failures {
            out.push_str(&format!("  {}: {}\n", failure.unit, failure.reason));
        }
    }
    out.trim_end().to_string()
}

/// Identity, capabilities and options of one component
pub fn render_component(key: &str, component: &Arc<dyn Component>) -> Result<String> {
    let mut out = format!("{} ({})\n", key, component.kind());
    if key != component.name() {
        out.push_str(&format!("  resolves as: {}\n", component.name()));
    }
    out.push_str(&format!(
        "  capabilities: {}\n\n",
        component.capabilities().join(", ")
    ));
    out.push_str(&toml::to_string_pretty(&component.options())?);
    Ok(out)
}
