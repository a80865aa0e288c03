// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::fs;

use catalyst::methods::plugins::bundled_plugins;
use catalyst::methods::{
    assemble_methods, discover_methods, merge_methods, sort_methods, ManifestScanner,
    MethodCatalog, MethodOrigin, PluginRegistry,
};
use tempfile::TempDir;

fn write_manifest(dir: &TempDir, file: &str, name: &str, iterations: u64) {
    let content = format!(
        "group = \"method_configs\"\nname = \"{name}\"\ndescription = \"{name} from {file}\"\n\n\
         [config]\nmethod_name = \"{name}\"\nmax_num_iterations = {iterations}\n"
    );
    fs::write(dir.path().join(file), content).unwrap();
}

#[test]
fn test_full_assembly_with_registry() {
    let dir = TempDir::new().unwrap();
    write_manifest(&dir, "long.toml", "splatfacto-long", 60000);

    let registry = PluginRegistry::with_parts(bundled_plugins(), vec![dir.path().to_path_buf()]);
    let scanner = ManifestScanner::new(Vec::new());
    let methods = assemble_methods(discover_methods(&registry, &scanner));

    assert_eq!(
        methods.names(),
        vec![
            "dream-catalyst",
            "igs2gs",
            "in2n",
            "in2n-small",
            "in2n-tiny",
            "splatfacto",
            "splatfacto-big",
            "splatfacto-long",
            "splatfacto-mcmc",
        ]
    );

    // The installed plugin replaces the placeholder of the same name.
    let dream = methods.get("dream-catalyst").unwrap();
    assert!(!dream.is_placeholder());
    assert!(matches!(dream.origin, MethodOrigin::Plugin { .. }));

    let long = methods.get("splatfacto-long").unwrap();
    assert_eq!(long.trainer().unwrap().max_num_iterations, 60000);
}

#[test]
fn test_broken_manifest_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_manifest(&dir, "good.toml", "good-method", 100);
    fs::write(dir.path().join("broken.toml"), "group = \"method_configs\"\nname = ").unwrap();
    fs::write(
        dir.path().join("other.toml"),
        "group = \"dataparser_configs\"\nname = \"other\"\n[config]\nmethod_name = \"other\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a manifest").unwrap();

    let registry = PluginRegistry::with_parts(Vec::new(), vec![dir.path().to_path_buf()]);
    let found = discover_methods(&registry, &ManifestScanner::new(Vec::new()));
    assert_eq!(found.names(), vec!["good-method"]);
}

#[test]
fn test_same_batch_duplicate_last_write_wins() {
    let dir = TempDir::new().unwrap();
    write_manifest(&dir, "a.toml", "twin", 1);
    write_manifest(&dir, "b.toml", "twin", 2);

    let registry = PluginRegistry::with_parts(Vec::new(), vec![dir.path().to_path_buf()]);
    let found = discover_methods(&registry, &ManifestScanner::new(Vec::new()));
    assert_eq!(found.len(), 1);
    assert_eq!(found.get("twin").unwrap().trainer().unwrap().max_num_iterations, 2);
}

#[test]
fn test_disabled_registry_falls_back_to_scan() {
    let dir = TempDir::new().unwrap();
    write_manifest(&dir, "scan.toml", "scanned", 10);

    let found = discover_methods(
        &PluginRegistry::disabled(),
        &ManifestScanner::new(vec![dir.path().to_path_buf()]),
    );
    assert_eq!(found.names(), vec!["scanned"]);

    // Without the registry the bundled plugin is absent and its placeholder shows.
    let methods = assemble_methods(found);
    assert!(methods.get("dream-catalyst").unwrap().is_placeholder());
}

#[test]
fn test_everything_unavailable_yields_builtins_and_placeholders() {
    let methods = assemble_methods(discover_methods(
        &PluginRegistry::disabled(),
        &ManifestScanner::new(Vec::new()),
    ));
    assert_eq!(methods.len(), 8);
}

#[test]
fn test_merge_then_sort_keeps_descriptions_aligned() {
    let assembled = assemble_methods(MethodCatalog::new());
    let reversed: MethodCatalog = assembled.iter().rev().cloned().collect();
    let sorted = sort_methods(merge_methods(MethodCatalog::new(), reversed, false));
    assert_eq!(sorted, assembled);
    for (name, description) in sorted.descriptions() {
        assert_eq!(description, assembled.get(name).unwrap().description);
    }
}
