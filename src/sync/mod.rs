// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog sync: backfill missing keys from the baseline
//!
//! Existing translations always win. The baseline only fills holes, and
//! keys that exist only in a locale are kept.

use crate::catalog::{is_empty, Catalog, Leaf};
use crate::config::I18nConfig;
use crate::store::LocaleStore;
use anyhow::Result;
use std::path::PathBuf;

/// Merge `source` (baseline subtree) into `target` (locale subtree).
///
/// Lists are all-or-nothing: an absent, null or empty local list takes the
/// baseline list wholesale, anything else is left alone.
pub fn merge_missing(target: Option<&Catalog>, source: &Catalog) -> Catalog {
    match source {
        Catalog::List(_) => match target {
            None | Some(Catalog::Leaf(Leaf::Null)) => source.clone(),
            Some(Catalog::List(items)) if items.is_empty() => source.clone(),
            Some(existing) => existing.clone(),
        },
        Catalog::Map(source_map) => {
            let mut out = match target {
                Some(Catalog::Map(existing)) => existing.clone(),
                _ => Default::default(),
            };
            for (key, source_child) in source_map {
                let merged = merge_missing(out.get(key), source_child);
                out.insert(key.clone(), merged);
            }
            Catalog::Map(out)
        }
        Catalog::Leaf(_) => match target {
            Some(existing) if !is_empty(Some(existing)) => existing.clone(),
            _ => source.clone(),
        },
    }
}

/// What a sync run touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub written: Vec<PathBuf>,
    pub unchanged: usize,
}

/// Sync the configured locale tree
pub fn run(config: &I18nConfig) -> Result<SyncSummary> {
    sync_store(&LocaleStore::from_config(config))
}

/// Bring every non-default locale up to the baseline key set.
pub fn sync_store(store: &LocaleStore) -> Result<SyncSummary> {
    let namespaces = store.namespaces()?;
    let locales = store.locales()?;
    let mut summary = SyncSummary::default();

    for locale in locales.iter().filter(|l| l.as_str() != store.default_locale()) {
        for namespace in &namespaces {
            let baseline = store.read_or_empty(store.default_locale(), namespace);
            let had_file = store.exists(locale, namespace);
            let current = store.read_or_empty(locale, namespace);

            let next = merge_missing(Some(&current), &baseline);
            let raw = next.to_pretty_json();

            if had_file && raw == current.to_pretty_json() {
                summary.unchanged += 1;
                continue;
            }

            let path = store.path(locale, namespace);
            crate::store::write_raw(&path, &raw)?;
            tracing::debug!(locale = %locale, namespace = %namespace, "catalog synced");
            summary.written.push(path);
        }
    }

    Ok(summary)
}
