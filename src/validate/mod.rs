// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog validation against the default-locale baseline
//!
//! Produces a [`ValidationReport`]: missing catalog files, missing keys in
//! required namespaces, orphaned keys, and placeholder drift.

pub mod placeholders;

use crate::catalog::{flatten, Catalog, Leaf};
use crate::config::I18nConfig;
use crate::store::LocaleStore;
use crate::types::{PlaceholderMismatch, ValidationReport};
use anyhow::Result;
use indexmap::IndexMap;
use placeholders::{placeholders_of, same_placeholders};

/// Which locales and namespaces must be complete
#[derive(Debug, Clone)]
pub struct Requirements<'c> {
    pub locales: &'c [String],
    pub namespaces: &'c [String],
}

impl<'c> Requirements<'c> {
    pub fn from_config(config: &'c I18nConfig) -> Self {
        Self {
            locales: &config.required_locales,
            namespaces: &config.required_namespaces,
        }
    }

    fn namespace_required(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }
}

/// Validate the configured locale tree
pub fn run(config: &I18nConfig) -> Result<ValidationReport> {
    let store = LocaleStore::from_config(config);
    validate_store(&store, &Requirements::from_config(config))
}

pub fn validate_store(store: &LocaleStore, required: &Requirements<'_>) -> Result<ValidationReport> {
    let namespaces = store.namespaces()?;
    let locales = store.locales()?;
    let mut report = ValidationReport::new(locales.clone(), namespaces.clone());

    for locale in &locales {
        let absent: Vec<String> = namespaces
            .iter()
            .filter(|ns| !store.exists(locale, ns))
            .cloned()
            .collect();
        if !absent.is_empty() {
            report.ok = false;
            report.missing_files.insert(locale.clone(), absent);
        }
    }

    for namespace in &namespaces {
        let baseline = store.read_or_empty(store.default_locale(), namespace);
        for locale in required.locales {
            let localized = store.read_or_empty(locale, namespace);
            compare_namespace(
                &mut report,
                locale,
                namespace,
                &baseline,
                &localized,
                required.namespace_required(namespace),
            );
        }
    }

    Ok(report)
}

/// Compares one locale's catalog with the baseline and folds the findings
/// into `report`.
pub fn compare_namespace(
    report: &mut ValidationReport,
    locale: &str,
    namespace: &str,
    baseline: &Catalog,
    localized: &Catalog,
    namespace_required: bool,
) {
    let base = flatten(baseline);
    let local = flatten(localized);
    let bucket = ValidationReport::bucket(locale, namespace);

    if namespace_required {
        let missing = keys_absent_from(&base, &local);
        if !missing.is_empty() {
            report.ok = false;
            report.missing.insert(bucket.clone(), missing);
        }
    }

    let extra = keys_absent_from(&local, &base);
    if !extra.is_empty() {
        report.ok = false;
        report.extra.insert(bucket, extra);
    }

    for (key, base_value) in &base {
        let Some(local_value) = local.get(key) else {
            continue;
        };
        let expected = placeholders_of(base_value);
        let actual = placeholders_of(local_value);
        if !same_placeholders(&expected, &actual) {
            report.ok = false;
            report.placeholder_mismatches.push(PlaceholderMismatch {
                locale: locale.to_string(),
                namespace: namespace.to_string(),
                key: key.clone(),
                base: expected.into_iter().collect(),
                localized: actual.into_iter().collect(),
            });
        }
    }
}

fn keys_absent_from(from: &IndexMap<String, Leaf>, other: &IndexMap<String, Leaf>) -> Vec<String> {
    from.keys()
        .filter(|key| !other.contains_key(*key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_only_reported_for_required_namespaces() {
        let mut report = ValidationReport::new(vec![], vec![]);
        let base = Catalog::from(json!({"a": {"b": "B", "c": "C"}}));
        let local = Catalog::from(json!({"a": {"c": "C"}}));

        compare_namespace(&mut report, "fr", "extra", &base, &local, false);
        assert!(report.missing.is_empty());
        assert!(report.ok);

        compare_namespace(&mut report, "fr", "common", &base, &local, true);
        assert_eq!(report.missing["fr.common"], vec!["a.b"]);
        assert!(!report.ok);
    }

    #[test]
    fn extra_keys_fail_even_when_namespace_optional() {
        let mut report = ValidationReport::new(vec![], vec![]);
        let base = Catalog::from(json!({"a": "A"}));
        let local = Catalog::from(json!({"a": "A", "stale": {"x": "X"}}));
        compare_namespace(&mut report, "de", "gallery", &base, &local, false);
        assert_eq!(report.extra["de.gallery"], vec!["stale.x"]);
        assert!(!report.ok);
    }

    #[test]
    fn placeholder_mismatch_is_recorded() {
        let mut report = ValidationReport::new(vec![], vec![]);
        let base = Catalog::from(json!({
            "greet": "Hello {{name}}, you have {{count}} messages",
            "bye": "Bye {{name}}"
        }));
        let local = Catalog::from(json!({
            "greet": "{{count}} mensajes para {{name}}",
            "bye": "Adiós {{nombre}}"
        }));
        compare_namespace(&mut report, "es", "common", &base, &local, true);
        assert!(!report.ok);
        assert_eq!(report.placeholder_mismatches.len(), 1);
        let mismatch = &report.placeholder_mismatches[0];
        assert_eq!(mismatch.key, "bye");
        assert_eq!(mismatch.base, vec!["name"]);
        assert_eq!(mismatch.localized, vec!["nombre"]);
    }

    #[test]
    fn list_items_are_compared_by_index() {
        let mut report = ValidationReport::new(vec![], vec![]);
        let base = Catalog::from(json!({"steps": ["One", "Two"]}));
        let local = Catalog::from(json!({"steps": ["Uno"]}));
        compare_namespace(&mut report, "es", "home", &base, &local, true);
        assert_eq!(report.missing["es.home"], vec!["steps.1"]);
    }
}
