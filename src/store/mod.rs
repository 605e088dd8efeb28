// SPDX-License-Identifier: PMPL-1.0-or-later

//! On-disk locale catalogs
//!
//! Layout: `<locales_root>/<locale>/<namespace>.json`. The default locale's
//! directory defines the namespace set for every locale.
//!
//! There is no locking. Runs must not overlap on the same locale tree.

use crate::catalog::Catalog;
use crate::config::I18nConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of reading one catalog file
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRead {
    Loaded(Catalog),
    NotFound,
    /// Present but unreadable or not valid JSON
    Corrupt(String),
}

impl CatalogRead {
    /// Absent and broken files both degrade to `{}`.
    pub fn into_catalog(self) -> Catalog {
        match self {
            CatalogRead::Loaded(catalog) => catalog,
            CatalogRead::NotFound | CatalogRead::Corrupt(_) => Catalog::empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocaleStore {
    root: PathBuf,
    default_locale: String,
}

impl LocaleStore {
    pub fn new(root: impl Into<PathBuf>, default_locale: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_locale: default_locale.into(),
        }
    }

    pub fn from_config(config: &I18nConfig) -> Self {
        Self::new(&config.locales_root, &config.default_locale)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn path(&self, locale: &str, namespace: &str) -> PathBuf {
        self.root.join(locale).join(format!("{}.json", namespace))
    }

    pub fn exists(&self, locale: &str, namespace: &str) -> bool {
        self.path(locale, namespace).is_file()
    }

    /// Namespace names from the default locale directory, sorted.
    pub fn namespaces(&self) -> Result<Vec<String>> {
        let dir = self.root.join(&self.default_locale);
        let mut names: Vec<String> = fs::read_dir(&dir)
            .with_context(|| format!("listing default locale {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(".json").map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Locale directories, sorted; names starting with `_` or `.` are skipped.
    pub fn locales(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(&self.root)
            .with_context(|| format!("listing locales in {}", self.root.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| !name.starts_with('_') && !name.starts_with('.'))
            .collect();
        names.sort();
        Ok(names)
    }

    pub fn read(&self, locale: &str, namespace: &str) -> CatalogRead {
        read_catalog(&self.path(locale, namespace))
    }

    pub fn read_or_empty(&self, locale: &str, namespace: &str) -> Catalog {
        read_or_empty(&self.path(locale, namespace))
    }

    pub fn write(&self, locale: &str, namespace: &str, catalog: &Catalog) -> Result<PathBuf> {
        let path = self.path(locale, namespace);
        write_raw(&path, &catalog.to_pretty_json())?;
        Ok(path)
    }
}

pub fn read_catalog(path: &Path) -> CatalogRead {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return CatalogRead::NotFound,
        Err(err) => return CatalogRead::Corrupt(err.to_string()),
    };
    match serde_json::from_str::<Catalog>(&raw) {
        Ok(catalog) => CatalogRead::Loaded(catalog),
        Err(err) => CatalogRead::Corrupt(err.to_string()),
    }
}

/// Reads a catalog, substituting `{}` when it is missing or broken.
pub fn read_or_empty(path: &Path) -> Catalog {
    let read = read_catalog(path);
    if let CatalogRead::Corrupt(reason) = &read {
        tracing::warn!(path = %path.display(), %reason, "catalog unreadable; treating as empty");
    }
    read.into_catalog()
}

pub fn write_raw(path: &Path, raw: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn seed(dir: &TempDir, rel: &str, body: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn discovers_namespaces_and_locales() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "en/navigation.json", "{}");
        seed(&dir, "en/common.json", "{}");
        seed(&dir, "en/notes.txt", "");
        seed(&dir, "fr/common.json", "{}");
        seed(&dir, "_drafts/common.json", "{}");
        fs::create_dir_all(dir.path().join(".cache")).unwrap();

        let store = LocaleStore::new(dir.path(), "en");
        assert_eq!(store.namespaces().unwrap(), vec!["common", "navigation"]);
        assert_eq!(store.locales().unwrap(), vec!["en", "fr"]);
    }

    #[test]
    fn distinguishes_missing_from_corrupt() {
        let dir = TempDir::new().unwrap();
        seed(&dir, "fr/common.json", "{ not json");
        seed(&dir, "de/common.json", r#"{"hello":"Hallo"}"#);
        let store = LocaleStore::new(dir.path(), "en");

        assert_eq!(store.read("es", "common"), CatalogRead::NotFound);
        assert!(matches!(store.read("fr", "common"), CatalogRead::Corrupt(_)));
        assert_eq!(store.read_or_empty("fr", "common"), Catalog::empty());
        assert_eq!(
            store.read_or_empty("de", "common"),
            Catalog::from(json!({"hello": "Hallo"}))
        );
    }

    #[test]
    fn write_creates_locale_directory() {
        let dir = TempDir::new().unwrap();
        let store = LocaleStore::new(dir.path(), "en");
        let path = store
            .write("ja", "common", &Catalog::from(json!({"a": "b"})))
            .unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{\n  \"a\": \"b\"\n}\n");
    }
}
