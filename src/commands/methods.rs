// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Method listing and inspection

use serde::Serialize;

use crate::cli::args::{MethodsArgs, MethodsCommands, OutputFormat};
use crate::error::{CatalystError, Result};
use crate::methods::{MethodCatalog, MethodConfig, MethodSpec};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodSummary<'a> {
    name: &'a str,
    description: &'a str,
    origin: String,
    installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline: Option<String>,
}

impl<'a> From<&'a MethodSpec> for MethodSummary<'a> {
    fn from(spec: &'a MethodSpec) -> Self {
        Self {
            name: &spec.name,
            description: &spec.description,
            origin: spec.origin.to_string(),
            installed: !spec.is_placeholder(),
            pipeline: spec.trainer().map(|t| t.pipeline.target.to_string()),
        }
    }
}

/// Execute the methods command
pub fn execute(args: &MethodsArgs, methods: &MethodCatalog, format: &OutputFormat) -> Result<()> {
    let output = match (&args.command, format) {
        (MethodsCommands::List { .. }, OutputFormat::Json) => {
            let summaries: Vec<MethodSummary> = methods.iter().map(MethodSummary::from).collect();
            serde_json::to_string_pretty(&summaries)?
        }
        (MethodsCommands::List { detailed }, OutputFormat::Text) => render_list(methods, *detailed),
        (MethodsCommands::Show { name }, OutputFormat::Json) => {
            serde_json::to_string_pretty(lookup(methods, name)?)?
        }
        (MethodsCommands::Show { name }, OutputFormat::Text) => render_show(lookup(methods, name)?)?,
    };
    println!("{}", output);
    Ok(())
}

/// Find a method or list the known names in the error
pub fn lookup<'a>(methods: &'a MethodCatalog, name: &str) -> Result<&'a MethodSpec> {
    methods.get(name).ok_or_else(|| {
        CatalystError::Method(format!(
            "unknown method '{}'. Available: {}",
            name,
            methods.names().join(", ")
        ))
    })
}

/// One line per method, padded to the longest name
pub fn render_list(methods: &MethodCatalog, detailed: bool) -> String {
    let width = methods.iter().map(|m| m.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for spec in methods.iter() {
        out.push_str(&format!("  {:<width$}  {}", spec.name, spec.description));
        if detailed {
            out.push_str(&format!("  [{}", spec.origin));
            if let Some(trainer) = spec.trainer() {
                out.push_str(&format!(", pipeline: {}", trainer.pipeline.target));
            }
            out.push(']');
        }
        out.push('\n');
    }
    out.push_str(&format!("\n{} methods", methods.len()));
    out
}

/// Description, origin and configuration (or install instructions)
pub fn render_show(spec: &MethodSpec) -> Result<String> {
    let mut out = format!("{}\n", spec.name);
    if !spec.description.is_empty() {
        out.push_str(&format!("  {}\n", spec.description));
    }
    out.push_str(&format!("  origin: {}\n\n", spec.origin));
    match &spec.config {
        MethodConfig::Trainer(config) => out.push_str(&toml::to_string_pretty(config.as_ref())?),
        MethodConfig::Placeholder(placeholder) => out.push_str(&placeholder.instructions),
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::assemble_methods;

    #[test]
    fn test_render_list_contains_every_method() {
        let methods = assemble_methods(MethodCatalog::new());
        let out = render_list(&methods, false);
        for name in methods.names() {
            assert!(out.contains(&name));
        }
        assert!(out.ends_with("8 methods"));
        assert!(!out.contains("built-in"));
    }

    #[test]
    fn test_render_list_detailed_shows_origin() {
        let methods = assemble_methods(MethodCatalog::new());
        let out = render_list(&methods, true);
        assert!(out.contains("[built-in, pipeline: vanilla]"));
        assert!(out.contains("[not installed]"));
    }

    #[test]
    fn test_render_show_trainer() {
        let methods = assemble_methods(MethodCatalog::new());
        let out = render_show(lookup(&methods, "splatfacto-mcmc").unwrap()).unwrap();
        // The mcmc preset shares the splatfacto method name
        assert!(out.contains("method_name = \"splatfacto\""));
        assert!(out.contains("strategy = \"mcmc\""));
        assert!(out.contains("stop_split_at = 25000"));
    }

    #[test]
    fn test_render_show_placeholder() {
        let methods = assemble_methods(MethodCatalog::new());
        let out = render_show(lookup(&methods, "igs2gs").unwrap()).unwrap();
        assert!(out.contains("origin: not installed"));
        assert!(out.contains("pip install"));
    }

    #[test]
    fn test_lookup_unknown_lists_names() {
        let methods = assemble_methods(MethodCatalog::new());
        let err = lookup(&methods, "nerfacto").unwrap_err();
        assert!(matches!(err, CatalystError::Method(_)));
        assert!(err.to_string().contains("splatfacto-big"));
    }

    #[test]
    fn test_summary_json() {
        let methods = assemble_methods(MethodCatalog::new());
        let summary = MethodSummary::from(methods.get("in2n").unwrap());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["installed"], false);
        assert!(json.get("pipeline").is_none());
    }
}
