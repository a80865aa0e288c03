// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use catalyst::cli::{Cli, Commands, GpuCommands, MethodsCommands, OutputFormat, SettingsCommands};
use catalyst::commands::train;
use catalyst::methods::{assemble_methods, MethodCatalog};
use clap::Parser;

#[test]
fn test_parse_methods_list() {
    let args = vec!["catalyst", "methods", "list"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Commands::Methods(methods_args) = cli.command {
        assert!(matches!(
            methods_args.command,
            MethodsCommands::List { detailed: false }
        ));
    } else {
        panic!("Expected Methods command");
    }
}

#[test]
fn test_parse_gpu_pick_defaults() {
    let args = vec!["catalyst", "gpu", "pick"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    if let Commands::Gpu(gpu_args) = cli.command {
        let GpuCommands::Pick(pick) = gpu_args.command;
        assert!(pick.mem_threshold.is_none());
        assert!(pick.util_threshold.is_none());
        assert!(!pick.no_set_env);
        assert!(!pick.export);
    } else {
        panic!("Expected Gpu command");
    }
}

#[test]
fn test_parse_settings_path_with_json() {
    let args = vec!["catalyst", "--format", "json", "settings", "path"];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    assert_eq!(cli.format, OutputFormat::Json);
    if let Commands::Settings(settings_args) = cli.command {
        assert!(matches!(settings_args.command, SettingsCommands::Path));
    } else {
        panic!("Expected Settings command");
    }
}

#[test]
fn test_parse_invalid_format() {
    let args = vec!["catalyst", "--format", "yaml", "methods", "list"];
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_train_round_trip_through_method_table() {
    let args = vec![
        "catalyst",
        "train",
        "splatfacto-big",
        "--steps-per-save",
        "500",
        "--pipeline.datamanager.dataparser.kind",
        "colmap",
    ];
    let cli = Cli::try_parse_from(args).expect("Valid command parsing");
    let Commands::Train(train_args) = cli.command else {
        panic!("Expected Train command");
    };

    let methods = assemble_methods(MethodCatalog::new());
    let request = train::parse(&methods, train_args.raw())
        .expect("Valid train flags")
        .expect("Not a help request");
    assert_eq!(request.method, "splatfacto-big");
    assert_eq!(request.config.method_name, "splatfacto");
    assert_eq!(request.config.steps_per_save, 500);
    assert_eq!(
        request.config.pipeline.datamanager.dataparser.kind.as_str(),
        "colmap"
    );
    assert!((request.config.pipeline.model.cull_alpha_thresh - 0.005).abs() < 1e-12);
}

#[test]
fn test_train_rejects_unknown_enum_value() {
    let methods = assemble_methods(MethodCatalog::new());
    let raw = vec![
        "splatfacto".to_string(),
        "--pipeline.datamanager.dataparser.kind".to_string(),
        "blender".to_string(),
    ];
    assert!(train::parse(&methods, &raw).is_err());
}
