// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Per-method train subcommands
//!
//! Every method in the final mapping becomes a subcommand. Each scalar leaf
//! of its trainer configuration becomes a flag named by the dotted path,
//! e.g. `--pipeline.model.cull-alpha-thresh 0.05`.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use crate::cli::args::{OutputFormat, TrainArgs};
use crate::config::Settings;
use crate::error::{CatalystError, Result};
use crate::gpu::{pick_idle_gpu, GpuQuery, NvidiaSmi, PickerOptions};
use crate::methods::schema::PipelineTarget;
use crate::methods::{MethodCatalog, MethodConfig, TrainerConfig};
use crate::pipeline::DreamCatalystPipelineConfig;

const PICK_GPU: &str = "pick-gpu";
const OUTPUT: &str = "output";

/// Leaves that identify the preset rather than tune it
const FIXED_LEAVES: &[&str] = &["method_name"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeafKind {
    Integer,
    Float,
    Boolean,
    Text,
}

/// A configuration leaf exposed as a flag
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFlag {
    path: Vec<String>,
    kind: LeafKind,
    default: String,
}

impl ConfigFlag {
    /// Dotted path in the configuration, e.g. `pipeline.model.sh_degree`
    pub fn id(&self) -> String {
        self.path.join(".")
    }

    /// Flag name, e.g. `pipeline.model.sh-degree`
    pub fn long(&self) -> String {
        self.id().replace('_', "-")
    }

    fn arg(&self) -> Arg {
        let arg = Arg::new(self.id())
            .long(self.long())
            .action(ArgAction::Set)
            .help(format!("[default: {}]", self.default));
        match self.kind {
            LeafKind::Integer => arg.value_name("INT").value_parser(value_parser!(i64)),
            LeafKind::Float => arg.value_name("FLOAT").value_parser(value_parser!(f64)),
            LeafKind::Boolean => arg.value_name("BOOL").value_parser(value_parser!(bool)),
            LeafKind::Text => arg.value_name("STR").value_parser(value_parser!(String)),
        }
    }

    fn value_from(&self, matches: &ArgMatches) -> Option<toml::Value> {
        let id = self.id();
        match self.kind {
            LeafKind::Integer => matches.get_one::<i64>(&id).map(|v| toml::Value::Integer(*v)),
            LeafKind::Float => matches.get_one::<f64>(&id).map(|v| toml::Value::Float(*v)),
            LeafKind::Boolean => matches.get_one::<bool>(&id).map(|v| toml::Value::Boolean(*v)),
            LeafKind::Text => matches
                .get_one::<String>(&id)
                .map(|v| toml::Value::String(v.clone())),
        }
    }
}

/// Flags for every scalar leaf of `config`, in serialization order
pub fn config_flags(config: &TrainerConfig) -> Result<Vec<ConfigFlag>> {
    let table = to_table(config)?;
    let mut flags = Vec::new();
    collect_flags(&table, &mut Vec::new(), &mut flags);
    flags.retain(|f| !FIXED_LEAVES.contains(&f.id().as_str()));
    Ok(flags)
}

fn to_table(config: &TrainerConfig) -> Result<toml::Table> {
    match toml::Value::try_from(config)? {
        toml::Value::Table(table) => Ok(table),
        _ => Err(CatalystError::Toml(
            "trainer configuration is not a table".to_string(),
        )),
    }
}

fn collect_flags(table: &toml::Table, prefix: &mut Vec<String>, out: &mut Vec<ConfigFlag>) {
    for (key, value) in table {
        prefix.push(key.clone());
        let kind = match value {
            toml::Value::Table(inner) => {
                collect_flags(inner, prefix, out);
                None
            }
            toml::Value::Integer(_) => Some(LeafKind::Integer),
            toml::Value::Float(_) => Some(LeafKind::Float),
            toml::Value::Boolean(_) => Some(LeafKind::Boolean),
            toml::Value::String(_) => Some(LeafKind::Text),
            // Arrays and datetimes are not exposed
            _ => None,
        };
        if let Some(kind) = kind {
            out.push(ConfigFlag {
                path: prefix.clone(),
                kind,
                default: value.to_string(),
            });
        }
        prefix.pop();
    }
}

fn set_path(table: &mut toml::Table, path: &[String], value: toml::Value) {
    match path {
        [] => {}
        [leaf] => {
            table.insert(leaf.clone(), value);
        }
        [head, rest @ ..] => {
            if let Some(toml::Value::Table(inner)) = table.get_mut(head) {
                set_path(inner, rest, value);
            }
        }
    }
}

/// The `train` command with one subcommand per method
pub fn train_command(methods: &MethodCatalog) -> Result<Command> {
    let mut command = Command::new("train")
        .bin_name("catalyst train")
        // Every name is free for methods; help stays available as `--help`
        .disable_help_subcommand(true)
        .about("Resolve a training method's configuration");

    for spec in methods.iter() {
        let mut sub = Command::new(spec.name.clone()).about(spec.description.clone());
        if let Some(trainer) = spec.trainer() {
            sub = sub
                .args(config_flags(trainer)?.iter().map(ConfigFlag::arg))
                .arg(
                    Arg::new(PICK_GPU)
                        .long(PICK_GPU)
                        .action(ArgAction::SetTrue)
                        .help("Pick an idle GPU before resolving"),
                )
                .arg(
                    Arg::new(OUTPUT)
                        .long(OUTPUT)
                        .short('o')
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the resolved configuration to a file"),
                );
        }
        command = command.subcommand(sub);
    }
    Ok(command)
}

/// A method invocation after flag parsing
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRequest {
    /// Registry key the user selected
    pub method: String,
    pub config: TrainerConfig,
    pub pick_gpu: bool,
    pub output: Option<PathBuf>,
}

/// Apply the flags in `matches` to the preset named `name`.
pub fn resolve(methods: &MethodCatalog, name: &str, matches: &ArgMatches) -> Result<TrainRequest> {
    let spec = super::methods::lookup(methods, name)?;
    let trainer = match &spec.config {
        MethodConfig::Trainer(config) => config.as_ref(),
        MethodConfig::Placeholder(placeholder) => {
            return Err(CatalystError::Method(format!(
                "method '{}' is not installed\n\n{}",
                name, placeholder.instructions
            )))
        }
    };

    let mut table = to_table(trainer)?;
    for flag in config_flags(trainer)? {
        if let Some(value) = flag.value_from(matches) {
            debug!(target: "catalyst.methods", flag = %flag.long(), value = %value, "Override");
            set_path(&mut table, &flag.path, value);
        }
    }
    let config: TrainerConfig = toml::Value::Table(table).try_into()?;

    Ok(TrainRequest {
        method: spec.name.clone(),
        config,
        pick_gpu: matches.get_flag(PICK_GPU),
        output: matches.get_one::<PathBuf>(OUTPUT).cloned(),
    })
}

/// Parse `<method> [flags]` against the method table.
///
/// Returns `None` when clap already printed help.
pub fn parse(methods: &MethodCatalog, raw: &[String]) -> Result<Option<TrainRequest>> {
    let mut command = train_command(methods)?;
    if raw.is_empty() {
        println!("{}", command.render_long_help());
        return Ok(None);
    }

    let argv = std::iter::once("train").chain(raw.iter().map(String::as_str));
    let matches = match command.try_get_matches_from_mut(argv) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(None);
        }
        Err(e) => return Err(CatalystError::InvalidInput(e.render().to_string())),
    };

    match matches.subcommand() {
        Some((name, sub_matches)) => resolve(methods, name, sub_matches).map(Some),
        None => Err(CatalystError::InvalidInput("no method given".to_string())),
    }
}

/// Execute the train command
pub async fn execute(
    args: &TrainArgs,
    methods: &MethodCatalog,
    settings: &Settings,
    format: &OutputFormat,
) -> Result<()> {
    let Some(request) = parse(methods, args.raw())? else {
        return Ok(());
    };
    let query = NvidiaSmi::from_config(&settings.gpu);
    let output = run_request(&request, &query, settings, format).await?;
    println!("{}", output);
    Ok(())
}

/// Carry out a parsed request and return what belongs on stdout.
///
/// The GPU status line is diagnostic and goes to stderr.
pub async fn run_request(
    request: &TrainRequest,
    query: &dyn GpuQuery,
    settings: &Settings,
    format: &OutputFormat,
) -> Result<String> {
    if request.pick_gpu {
        let selection = pick_idle_gpu(query, &PickerOptions::from_config(&settings.gpu)).await?;
        eprintln!("{}", selection.status_line());
    }

    if request.config.pipeline.target == PipelineTarget::DreamCatalyst {
        let pipeline = DreamCatalystPipelineConfig::from_trainer(&request.config, &settings.pipeline)?;
        debug!(
            target: "catalyst.pipeline",
            log_every_steps = pipeline.log_every_steps,
            "Editing pipeline configuration is valid"
        );
    }

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&request.config)?,
        OutputFormat::Text => toml::to_string_pretty(&request.config)?,
    };

    match &request.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)?;
            Ok(format!("Wrote {} configuration to {}", request.method, path.display()))
        }
        None => Ok(rendered),
    }
}
