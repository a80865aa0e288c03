// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Ordered method mapping
//!
//! A `MethodCatalog` keeps its entries in insertion order with unique names.
//! The description travels with each entry, so reordering the mapping
//! reorders the descriptions identically.

use serde::{Deserialize, Serialize};

use super::schema::MethodSpec;

/// Insertion-ordered mapping from method name to preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodCatalog {
    entries: Vec<MethodSpec>,
}

impl MethodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a method, replacing an existing entry of the same name in place.
    ///
    /// Returns the replaced entry, if any. New names are appended.
    pub fn insert(&mut self, spec: MethodSpec) -> Option<MethodSpec> {
        match self.position(&spec.name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx], spec)),
            None => {
                self.entries.push(spec);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&MethodSpec> {
        self.position(name).map(|idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Method names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|spec| spec.name.clone()).collect()
    }

    /// `(name, description)` pairs in catalog order
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|spec| (spec.name.as_str(), spec.description.as_str()))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MethodSpec> {
        self.entries.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|spec| spec.name == name)
    }
}

impl FromIterator<MethodSpec> for MethodCatalog {
    /// Later duplicates replace earlier ones (last write wins).
    fn from_iter<I: IntoIterator<Item = MethodSpec>>(iter: I) -> Self {
        let mut catalog = MethodCatalog::new();
        for spec in iter {
            catalog.insert(spec);
        }
        catalog
    }
}

impl IntoIterator for MethodCatalog {
    type Item = MethodSpec;
    type IntoIter = std::vec::IntoIter<MethodSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MethodCatalog {
    type Item = &'a MethodSpec;
    type IntoIter = std::slice::Iter<'a, MethodSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Merge `incoming` into `base`.
///
/// A name from `incoming` is taken when `overwrite` is set or when `base`
/// does not have it. Names only in `base` are kept unchanged. Collisions are
/// never an error.
pub fn merge_methods(
    base: MethodCatalog,
    incoming: MethodCatalog,
    overwrite: bool,
) -> MethodCatalog {
    let mut merged = base;
    for spec in incoming {
        if overwrite || !merged.contains(&spec.name) {
            merged.insert(spec);
        }
    }
    merged
}

/// Order entries by ascending name.
pub fn sort_methods(catalog: MethodCatalog) -> MethodCatalog {
    let mut entries = catalog.entries;
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    MethodCatalog { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::schema::{MethodOrigin, TrainerConfig};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn spec(name: &str, tag: &str) -> MethodSpec {
        MethodSpec::new(name, TrainerConfig::new(tag)).with_description(tag)
    }

    fn catalog(entries: &[(&str, &str)]) -> MethodCatalog {
        entries.iter().map(|(name, tag)| spec(name, tag)).collect()
    }

    fn tag_of(catalog: &MethodCatalog, name: &str) -> String {
        catalog.get(name).unwrap().trainer().unwrap().method_name.clone()
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut cat = catalog(&[("a", "1"), ("b", "2")]);
        let replaced = cat.insert(spec("a", "3"));
        assert_eq!(replaced.unwrap().description, "1");
        assert_eq!(cat.names(), vec!["a", "b"]);
        assert_eq!(tag_of(&cat, "a"), "3");
    }

    #[test]
    fn test_from_iter_last_write_wins() {
        let cat = catalog(&[("a", "first"), ("a", "second")]);
        assert_eq!(cat.len(), 1);
        assert_eq!(tag_of(&cat, "a"), "second");
    }

    #[test]
    fn test_merge_overwrite_takes_incoming() {
        let base = catalog(&[("splatfacto", "stock")]);
        let incoming = catalog(&[("splatfacto", "plugin")]);
        let merged = merge_methods(base, incoming, true);
        assert_eq!(tag_of(&merged, "splatfacto"), "plugin");
        assert_eq!(merged.get("splatfacto").unwrap().description, "plugin");
    }

    #[test]
    fn test_merge_no_overwrite_keeps_base() {
        let base = catalog(&[("splatfacto", "stock")]);
        let incoming = catalog(&[("splatfacto", "placeholder"), ("in2n", "placeholder")]);
        let merged = merge_methods(base, incoming, false);
        assert_eq!(tag_of(&merged, "splatfacto"), "stock");
        assert_eq!(tag_of(&merged, "in2n"), "placeholder");
    }

    #[test]
    fn test_merge_appends_new_names_in_incoming_order() {
        let base = catalog(&[("m", "1")]);
        let incoming = catalog(&[("z", "2"), ("a", "3")]);
        let merged = merge_methods(base, incoming, true);
        assert_eq!(merged.names(), vec!["m", "z", "a"]);
    }

    #[test]
    fn test_merge_keeps_origin_of_winner() {
        let base = catalog(&[("a", "1")]);
        let incoming: MethodCatalog = vec![spec("a", "2").with_origin(MethodOrigin::Plugin {
            source: "ext".to_string(),
        })]
        .into_iter()
        .collect();
        let merged = merge_methods(base, incoming, true);
        assert!(matches!(
            merged.get("a").unwrap().origin,
            MethodOrigin::Plugin { .. }
        ));
    }

    #[test]
    fn test_sort_orders_descriptions_identically() {
        let cat = sort_methods(catalog(&[("splatfacto-mcmc", "c"), ("dream-catalyst", "a")]));
        assert_eq!(
            cat.descriptions(),
            vec![("dream-catalyst", "a"), ("splatfacto-mcmc", "c")]
        );
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_methods(MethodCatalog::new()).is_empty());
    }

    fn arb_catalog() -> impl Strategy<Value = MethodCatalog> {
        prop::collection::vec(("[a-e]{1,2}", "[xyz]"), 0..8).prop_map(|pairs| {
            pairs
                .iter()
                .map(|(name, tag)| spec(name, tag))
                .collect::<MethodCatalog>()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_size_is_union(base in arb_catalog(), incoming in arb_catalog(), overwrite in any::<bool>()) {
            let union: BTreeSet<String> = base.names().into_iter().chain(incoming.names()).collect();
            let merged = merge_methods(base, incoming, overwrite);
            prop_assert_eq!(merged.len(), union.len());
        }

        #[test]
        fn prop_merge_precedence(base in arb_catalog(), incoming in arb_catalog(), overwrite in any::<bool>()) {
            let merged = merge_methods(base.clone(), incoming.clone(), overwrite);
            for spec in &merged {
                let expected = match (base.get(&spec.name), incoming.get(&spec.name)) {
                    (Some(_), Some(new)) if overwrite => new,
                    (Some(old), _) => old,
                    (None, Some(new)) => new,
                    (None, None) => unreachable!(),
                };
                prop_assert_eq!(spec, expected);
            }
        }

        #[test]
        fn prop_sort_idempotent(cat in arb_catalog()) {
            let once = sort_methods(cat);
            let twice = sort_methods(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sort_is_ascending(cat in arb_catalog()) {
            let names = sort_methods(cat).names();
            let mut expected = names.clone();
            expected.sort();
            prop_assert_eq!(names, expected);
        }
    }
}
