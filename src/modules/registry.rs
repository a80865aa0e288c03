// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{Component, ComponentKind};
use crate::error::{CatalystError, Result};

/// Components keyed by name
#[derive(Debug, Default, Clone)]
pub struct ModuleRegistry {
    components: BTreeMap<String, Arc<dyn Component>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under its own name.
    ///
    /// Names are unique; a second registration of the same name fails and
    /// leaves the first one in place.
    pub fn register(&mut self, component: Arc<dyn Component>) -> Result<()> {
        let name = component.name().to_string();
        if self.components.contains_key(&name) {
            return Err(CatalystError::Module(format!(
                "module '{}' already exists: names of extensions conflict",
                name
            )));
        }
        debug!(target: "catalyst.modules", name = %name, kind = %component.kind(), "Registered component");
        self.components.insert(name, component);
        Ok(())
    }

    /// Look up a plain key or build a composite `"base:mixin1,mixin2"`.
    pub fn find(&self, key: &str) -> Result<Arc<dyn Component>> {
        match key.split_once(':') {
            None => self.get(key),
            Some((base, mixins)) => {
                if mixins.contains(':') {
                    return Err(CatalystError::Module(format!(
                        "invalid component key '{}': more than one ':'",
                        key
                    )));
                }
                let base = self.get(base)?;
                let mixins = mixins
                    .split(',')
                    .map(|name| self.get(name))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Arc::new(ComposedComponent::new(base, mixins)))
            }
        }
    }

    fn get(&self, name: &str) -> Result<Arc<dyn Component>> {
        if name.is_empty() {
            return Err(CatalystError::Module("empty component name".to_string()));
        }
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| CatalystError::Module(format!("unknown component '{}'", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Component>> {
        self.components.values()
    }

    /// Components of one kind, in name order
    pub fn by_kind(&self, kind: ComponentKind) -> Vec<&Arc<dyn Component>> {
        self.iter().filter(|c| c.kind() == kind).collect()
    }
}

/// A base component with mixins layered on top.
///
/// Identity (name and kind) comes from the base. For options, the first
/// mixin wins, then the following mixins, then the base.
#[derive(Debug)]
pub struct ComposedComponent {
    base: Arc<dyn Component>,
    mixins: Vec<Arc<dyn Component>>,
}

impl ComposedComponent {
    pub fn new(base: Arc<dyn Component>, mixins: Vec<Arc<dyn Component>>) -> Self {
        Self { base, mixins }
    }

    /// The composite key this component was built from
    pub fn key(&self) -> String {
        let mixins: Vec<&str> = self.mixins.iter().map(|m| m.name()).collect();
        format!("{}:{}", self.base.name(), mixins.join(","))
    }

    pub fn mixin_names(&self) -> Vec<&str> {
        self.mixins.iter().map(|m| m.name()).collect()
    }
}

impl Component for ComposedComponent {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn kind(&self) -> ComponentKind {
        self.base.kind()
    }

    fn capabilities(&self) -> Vec<String> {
        let mut caps: Vec<String> = Vec::new();
        for part in self.mixins.iter().chain(std::iter::once(&self.base)) {
            for cap in part.capabilities() {
                if !caps.contains(&cap) {
                    caps.push(cap);
                }
            }
        }
        caps
    }

    fn options(&self) -> toml::Table {
        let mut options = self.base.options();
        for mixin in self.mixins.iter().rev() {
            options.extend(mixin.options());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::ComponentDescriptor;

    fn descriptor(name: &str, kind: ComponentKind, caps: &[&str], opts: &str) -> Arc<dyn Component> {
        let options: toml::Table = toml::from_str(opts).unwrap();
        Arc::new(ComponentDescriptor::new(name, kind, caps, options))
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry
            .register(descriptor(
                "base-system",
                ComponentKind::System,
                &["render", "text-to-3d"],
                "lr = 0.01\nsteps = 100",
            ))
            .unwrap();
        registry
            .register(descriptor(
                "fast",
                ComponentKind::Guidance,
                &["half-precision"],
                "steps = 10\nhalf = true",
            ))
            .unwrap();
        registry
            .register(descriptor(
                "slow",
                ComponentKind::Guidance,
                &["render", "anneal"],
                "steps = 1000\nanneal = 0.5",
            ))
            .unwrap();
        registry
    }

    #[test]
    fn test_register_duplicate_conflicts() {
        let mut registry = registry();
        let err = registry
            .register(descriptor("fast", ComponentKind::Data, &[], ""))
            .unwrap_err();
        assert!(err.to_string().contains("names of extensions conflict"));
        assert_eq!(registry.find("fast").unwrap().kind(), ComponentKind::Guidance);
    }

    #[test]
    fn test_find_plain_key() {
        let component = registry().find("slow").unwrap();
        assert_eq!(component.name(), "slow");
        assert_eq!(component.options()["steps"].as_integer(), Some(1000));
    }

    #[test]
    fn test_find_unknown_key() {
        let err = registry().find("missing").unwrap_err();
        assert!(matches!(err, CatalystError::Module(_)));
        assert!(err.to_string().contains("unknown component 'missing'"));
    }

    #[test]
    fn test_find_composite_keeps_base_identity() {
        let composed = registry().find("base-system:fast").unwrap();
        assert_eq!(composed.name(), "base-system");
        assert_eq!(composed.kind(), ComponentKind::System);
    }

    #[test]
    fn test_composite_capabilities_union() {
        let composed = registry().find("base-system:fast,slow").unwrap();
        assert_eq!(
            composed.capabilities(),
            vec!["half-precision", "render", "anneal", "text-to-3d"]
        );
    }

    #[test]
    fn test_composite_first_mixin_wins() {
        let composed = registry().find("base-system:fast,slow").unwrap();
        let options = composed.options();
        assert_eq!(options["steps"].as_integer(), Some(10));
        assert_eq!(options["anneal"].as_float(), Some(0.5));
        assert_eq!(options["half"].as_bool(), Some(true));
        assert_eq!(options["lr"].as_float(), Some(0.01));

        let reversed = registry().find("base-system:slow,fast").unwrap();
        assert_eq!(reversed.options()["steps"].as_integer(), Some(1000));
    }

    #[test]
    fn test_composite_unknown_mixin() {
        let err = registry().find("base-system:fast,nope").unwrap_err();
        assert!(err.to_string().contains("unknown component 'nope'"));
    }

    #[test]
    fn test_composite_unknown_base() {
        assert!(registry().find("nope:fast").is_err());
    }

    #[test]
    fn test_composite_malformed_keys() {
        let registry = registry();
        assert!(registry.find("base-system:").is_err());
        assert!(registry.find(":fast").is_err());
        assert!(registry.find("base-system:fast:slow").is_err());
        assert!(registry.find("base-system:fast,,slow").is_err());
    }

    #[test]
    fn test_composed_key() {
        let base = registry().find("base-system").unwrap();
        let fast = registry().find("fast").unwrap();
        let slow = registry().find("slow").unwrap();
        let composed = ComposedComponent::new(base, vec![fast, slow]);
        assert_eq!(composed.key(), "base-system:fast,slow");
        assert_eq!(composed.mixin_names(), vec!["fast", "slow"]);
    }

    #[test]
    fn test_by_kind_and_names() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["base-system", "fast", "slow"]);
        assert_eq!(registry.by_kind(ComponentKind::Guidance).len(), 2);
        assert!(registry.by_kind(ComponentKind::Data).is_empty());
    }
}
