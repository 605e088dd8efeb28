// SPDX-License-Identifier: PMPL-1.0-or-later

//! `doctor`: checks the project layout and translation settings before a run

use crate::config::{I18nConfig, AUTH_KEY_ENV};
use crate::store::LocaleStore;
use anyhow::{anyhow, Result};
use std::path::Path;

pub fn run_self_diagnostics(config: &I18nConfig) -> Result<()> {
    println!("i18n-audit self-diagnostics");

    let checks = collect_checks(config);

    println!();
    for entry in &checks {
        entry.print();
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

fn collect_checks(config: &I18nConfig) -> Vec<Check> {
    let store = LocaleStore::from_config(config);
    let root = &config.project_root;

    let mut checks = vec![Check::ok(
        "version",
        format!("i18n-audit {}", env!("CARGO_PKG_VERSION")),
    )];

    checks.push(check_directory("locales root", root, &config.locales_root, Missing::Error));
    checks.push(check_directory(
        "default locale",
        root,
        &config.locales_root.join(&config.default_locale),
        Missing::Error,
    ));
    checks.push(check_namespaces(&store));
    checks.push(check_required_locales(&store, &config.required_locales));
    checks.push(check_directory("source directory", root, &config.source_dir, Missing::Warn));
    checks.push(check_directory("reports directory", root, &config.reports_dir, Missing::Warn));
    checks.push(check_html(&root.join("index.html")));
    checks.push(check_credential(config));
    checks.push(check_targets(config));
    checks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Missing {
    Warn,
    Error,
}

struct Check {
    label: &'static str,
    level: Level,
    detail: String,
}

impl Check {
    fn new(label: &'static str, level: Level, detail: String) -> Self {
        Self {
            label,
            level,
            detail,
        }
    }

    fn ok(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Ok, detail)
    }

    fn warning(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Warn, detail)
    }

    fn error(label: &'static str, detail: String) -> Self {
        Self::new(label, Level::Error, detail)
    }

    fn print(&self) {
        println!("  [{}] {:22} {}", self.level.tag(), self.label, self.detail);
    }
}

impl Level {
    fn tag(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Warn => "WARN",
            Level::Error => "ERR",
        }
    }
}

fn relative<'p>(root: &Path, path: &'p Path) -> std::borrow::Cow<'p, str> {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy()
}

fn check_directory(label: &'static str, root: &Path, path: &Path, missing: Missing) -> Check {
    let shown = relative(root, path);
    if path.is_dir() {
        Check::ok(label, format!("{} exists", shown))
    } else if path.exists() {
        Check::warning(label, format!("{} exists but is not a directory", shown))
    } else if missing == Missing::Error {
        Check::error(label, format!("{} missing", shown))
    } else {
        Check::warning(label, format!("{} missing (created on first write)", shown))
    }
}

fn check_namespaces(store: &LocaleStore) -> Check {
    match store.namespaces() {
        Ok(namespaces) if !namespaces.is_empty() => {
            Check::ok("namespaces", namespaces.join(", "))
        }
        Ok(_) => Check::error(
            "namespaces",
            format!("no .json catalogs under {}", store.default_locale()),
        ),
        Err(err) => Check::error("namespaces", format!("{:#}", err)),
    }
}

fn check_required_locales(store: &LocaleStore, required: &[String]) -> Check {
    let found = store.locales().unwrap_or_default();
    let absent: Vec<&str> = required
        .iter()
        .filter(|locale| !found.contains(*locale))
        .map(String::as_str)
        .collect();
    if absent.is_empty() {
        Check::ok("required locales", required.join(", "))
    } else {
        Check::warning(
            "required locales",
            format!("no directory for {} (run sync)", absent.join(", ")),
        )
    }
}

fn check_html(path: &Path) -> Check {
    if path.is_file() {
        Check::ok("index.html", "found (title and description scanned)".to_string())
    } else {
        Check::warning("index.html", "not found (skipped by inventory)".to_string())
    }
}

fn check_credential(config: &I18nConfig) -> Check {
    match config.translate.credential() {
        Ok(_) => Check::ok("translation service", format!("configured ({})", AUTH_KEY_ENV)),
        Err(_) => Check::warning(
            "translation service",
            format!("not configured (set {} to enable translate)", AUTH_KEY_ENV),
        ),
    }
}

fn check_targets(config: &I18nConfig) -> Check {
    match config.translate.resolve_targets() {
        Ok(targets) => Check::ok(
            "target locales",
            targets
                .iter()
                .map(|(locale, code)| format!("{}→{}", locale, code))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Err(err) => Check::error("target locales", err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nProfile;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, env: &[(&str, &str)]) -> I18nConfig {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        I18nConfig::resolve(dir.path(), I18nProfile::default(), |key| {
            env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap()
    }

    fn level_of(checks: &[Check], label: &str) -> Level {
        checks
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.level)
            .unwrap()
    }

    #[test]
    fn empty_project_reports_errors() {
        let dir = TempDir::new().unwrap();
        let checks = collect_checks(&config(&dir, &[]));
        assert_eq!(level_of(&checks, "locales root"), Level::Error);
        assert_eq!(level_of(&checks, "namespaces"), Level::Error);
        assert_eq!(level_of(&checks, "translation service"), Level::Warn);
        assert_eq!(level_of(&checks, "index.html"), Level::Warn);
    }

    #[test]
    fn seeded_project_passes_layout_checks() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/locales/en")).unwrap();
        fs::write(dir.path().join("src/locales/en/common.json"), "{}").unwrap();
        fs::write(dir.path().join("index.html"), "<title>Hi</title>").unwrap();

        let checks = collect_checks(&config(&dir, &[("DEEPL_AUTH_KEY", "k")]));
        assert_eq!(level_of(&checks, "locales root"), Level::Ok);
        assert_eq!(level_of(&checks, "default locale"), Level::Ok);
        assert_eq!(level_of(&checks, "namespaces"), Level::Ok);
        assert_eq!(level_of(&checks, "translation service"), Level::Ok);
        assert_eq!(level_of(&checks, "required locales"), Level::Warn);
        assert!(!checks.iter().any(|c| c.level == Level::Error));
    }

    #[test]
    fn unmapped_target_locale_is_an_error() {
        let dir = TempDir::new().unwrap();
        let checks = collect_checks(&config(&dir, &[("I18N_TARGET_LOCALES", "ja,xx")]));
        assert_eq!(level_of(&checks, "target locales"), Level::Error);
    }
}
