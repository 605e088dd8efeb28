// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end runs against a temporary project tree

use i18n_audit::backfill::{self, TranslateError, Translator};
use i18n_audit::config::{I18nConfig, I18nProfile};
use i18n_audit::report;
use i18n_audit::store::LocaleStore;
use i18n_audit::types::EntryKind;
use i18n_audit::{extract, sync, validate};
use serde_json::{json, Value};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, rel: &str, body: &str) {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn write_json(dir: &TempDir, rel: &str, value: Value) {
    write(dir, rel, &serde_json::to_string_pretty(&value).unwrap());
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn config(dir: &TempDir, env: &[(&str, &str)]) -> I18nConfig {
    let env: Vec<(String, String)> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    I18nConfig::resolve(dir.path(), I18nProfile::default(), move |key| {
        env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

#[test]
fn test_sync_then_validate_reports_no_missing_keys() {
    let dir = TempDir::new().unwrap();
    let baseline = json!({"hello": "Hello", "nav": {"home": "Home"}});
    write_json(&dir, "src/locales/en/common.json", baseline.clone());
    fs::create_dir_all(dir.path().join("src/locales/fr")).unwrap();
    let config = config(&dir, &[("I18N_REQUIRED_LOCALES", "en,fr")]);

    let summary = sync::run(&config).unwrap();
    assert_eq!(summary.written.len(), 1);

    let synced = dir.path().join("src/locales/fr/common.json");
    assert_eq!(read_json(&synced), baseline);
    assert!(fs::read_to_string(&synced).unwrap().ends_with("}\n"));

    let report = validate::run(&config).unwrap();
    assert!(!report.missing.contains_key("fr.common"));
    assert!(report.ok);

    // second run finds nothing to do
    let again = sync::run(&config).unwrap();
    assert!(again.written.is_empty());
    assert_eq!(again.unchanged, 1);
}

#[test]
fn test_sync_leaves_default_locale_alone_and_keeps_translations() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "src/locales/en/home.json", json!({"title": "Title", "cta": "Book"}));
    write_json(&dir, "src/locales/de/home.json", json!({"title": "Titel", "legacy": "Alt"}));
    let config = config(&dir, &[]);

    sync::run(&config).unwrap();

    assert_eq!(
        read_json(&dir.path().join("src/locales/de/home.json")),
        json!({"title": "Titel", "legacy": "Alt", "cta": "Book"})
    );
    assert_eq!(
        read_json(&dir.path().join("src/locales/en/home.json")),
        json!({"title": "Title", "cta": "Book"})
    );
}

#[test]
fn test_validate_missing_keys_only_for_required_namespaces() {
    let dir = TempDir::new().unwrap();
    let base = json!({"a": {"b": "B", "c": "C"}});
    let partial = json!({"a": {"c": "C"}});
    write_json(&dir, "src/locales/en/common.json", base.clone());
    write_json(&dir, "src/locales/en/gallery.json", base);
    write_json(&dir, "src/locales/fr/common.json", partial.clone());
    write_json(&dir, "src/locales/fr/gallery.json", partial);
    let config = config(
        &dir,
        &[("I18N_REQUIRED_LOCALES", "en,fr"), ("I18N_REQUIRED_NAMESPACES", "common")],
    );

    let result = validate::run(&config).unwrap();
    assert_eq!(result.missing["fr.common"], vec!["a.b"]);
    assert!(!result.missing.contains_key("fr.gallery"));
    assert!(!result.ok);
    assert_eq!(result.locales, vec!["en", "fr"]);
    assert_eq!(result.namespaces, vec!["common", "gallery"]);
}

#[test]
fn test_validate_flags_missing_files_and_writes_reports() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "src/locales/en/common.json", json!({"a": "A"}));
    write_json(&dir, "src/locales/en/footer.json", json!({"b": "B"}));
    write_json(&dir, "src/locales/es/common.json", json!({"a": "A"}));
    fs::create_dir_all(dir.path().join("src/locales/_drafts")).unwrap();
    let config = config(&dir, &[("I18N_REQUIRED_LOCALES", "es")]);

    let result = validate::run(&config).unwrap();
    assert_eq!(result.missing_files["es"], vec!["footer"]);
    assert_eq!(result.missing["es.footer"], vec!["b"]);
    assert_eq!(result.locales, vec!["en", "es"]);

    let path = report::write_validation(&config.reports_dir, &result).unwrap();
    assert_eq!(path, dir.path().join("reports/i18n/validate.json"));
    let saved = read_json(&path);
    assert_eq!(saved["ok"], false);
    assert_eq!(saved["missingFiles"]["es"], json!(["footer"]));

    let (missing_path, buckets) = report::extract_missing(&config.reports_dir).unwrap();
    assert_eq!(buckets, 1);
    assert_eq!(read_json(&missing_path), json!({"es.footer": ["b"]}));
}

#[test]
fn test_corrupt_catalog_is_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "src/locales/en/common.json", json!({"a": "A"}));
    write(&dir, "src/locales/fr/common.json", "{ not json");
    let config = config(&dir, &[("I18N_REQUIRED_LOCALES", "fr")]);

    let result = validate::run(&config).unwrap();
    assert!(result.missing_files.is_empty());
    assert_eq!(result.missing["fr.common"], vec!["a"]);
}

#[test]
fn test_inventory_scans_sources_and_html() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "index.html",
        "<html>\n<head>\n<title>The Asri</title>\n<meta name=\"description\" content=\"Boutique stay\">\n</head>\n</html>\n",
    );
    write(
        &dir,
        "src/components/Header.tsx",
        r#"export function Header() {
  return (
    <header>
      <img src="/images/logo.svg" alt="Resort logo" />
      <a href="https://example.com">Book Now</a>
      <span>12,500</span>
    </header>
  );
}
"#,
    );
    write(
        &dir,
        "src/App.jsx",
        "export const notify = () => alert('Saved');\n",
    );
    write(&dir, "node_modules/lib/index.tsx", "export const X = () => <p>Ignored</p>;\n");
    let config = config(&dir, &[]);

    let entries = extract::run(&config).unwrap();
    let summary: Vec<(&str, &str, EntryKind, usize)> = entries
        .iter()
        .map(|e| (e.origin.file.as_str(), e.text.as_str(), e.kind, e.origin.line))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("index.html", "The Asri", EntryKind::HtmlTitle, 3),
            ("index.html", "Boutique stay", EntryKind::HtmlMeta, 4),
            ("src/App.jsx", "Saved", EntryKind::DialogText, 1),
            ("src/components/Header.tsx", "Resort logo", EntryKind::Attribute, 4),
            ("src/components/Header.tsx", "Book Now", EntryKind::TextNode, 5),
        ]
    );
    assert_eq!(
        entries[3].extra.as_ref().map(|e| e.attribute_name.as_str()),
        Some("alt")
    );

    let path = report::write_inventory(&config.reports_dir, &entries, chrono::Utc::now()).unwrap();
    let saved = read_json(&path);
    assert_eq!(saved.as_array().map(Vec::len), Some(5));
    assert_eq!(saved[3]["kind"], "attribute");
    assert_eq!(saved[3]["extra"]["attributeName"], "alt");
    let summary_md = fs::read_to_string(dir.path().join("reports/i18n/summary.md")).unwrap();
    assert!(summary_md.contains("Total entries: 5"));
    assert!(summary_md.contains("- index.html: 2\n"));
    assert!(summary_md.contains("- src/components/Header.tsx: 2\n"));
}

/// Prefixes every text with the language code.
struct Tagging {
    calls: Cell<usize>,
}

impl Translator for Tagging {
    fn translate_batch(
        &self,
        texts: &[String],
        target_lang: &str,
    ) -> Result<Vec<String>, TranslateError> {
        self.calls.set(self.calls.get() + 1);
        Ok(texts.iter().map(|t| format!("[{}] {}", target_lang, t)).collect())
    }
}

#[test]
fn test_backfill_translates_untranslated_leaves_per_locale() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "src/locales/en/common.json",
        json!({"greeting": "Hello", "cta": "Book", "count": 3}),
    );
    write_json(&dir, "src/locales/en/footer.json", json!({"rights": "All rights reserved"}));
    write_json(&dir, "src/locales/ja/common.json", json!({"greeting": "こんにちは", "cta": "Book"}));
    write_json(&dir, "src/locales/ja/footer.json", json!({"rights": "無断転載禁止"}));
    let config = config(&dir, &[("I18N_TARGET_LOCALES", "ja,pt"), ("DEEPL_PT_VARIANT", "PT-BR")]);
    let translator = Tagging { calls: Cell::new(0) };

    let summary = backfill::run(&config, &translator).unwrap();
    assert_eq!(summary.translated, 1 + 3);
    assert_eq!(translator.calls.get(), 3);

    assert_eq!(
        read_json(&dir.path().join("src/locales/ja/common.json")),
        json!({"greeting": "こんにちは", "cta": "[JA] Book"})
    );
    assert_eq!(
        read_json(&dir.path().join("src/locales/pt/common.json")),
        json!({"greeting": "[PT-BR] Hello", "cta": "[PT-BR] Book"})
    );
    assert_eq!(
        read_json(&dir.path().join("src/locales/pt/footer.json")),
        json!({"rights": "[PT-BR] All rights reserved"})
    );
    // nothing left to translate in ja/footer, so it was never rewritten
    assert_eq!(
        fs::read_to_string(dir.path().join("src/locales/ja/footer.json")).unwrap(),
        serde_json::to_string_pretty(&json!({"rights": "無断転載禁止"})).unwrap()
    );
}

#[test]
fn test_backfill_unmapped_locale_fails_before_any_io() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "src/locales/en/common.json", json!({"a": "A"}));
    let config = config(&dir, &[("I18N_TARGET_LOCALES", "ja,xx")]);
    let translator = Tagging { calls: Cell::new(0) };

    let err = backfill::run(&config, &translator).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported locale for auto-translate: xx");
    assert_eq!(translator.calls.get(), 0);
    assert!(!dir.path().join("src/locales/ja").exists());
}

#[test]
fn test_locale_store_discovers_sorted_namespaces() {
    let dir = TempDir::new().unwrap();
    write_json(&dir, "locales/en/home.json", json!({}));
    write_json(&dir, "locales/en/common.json", json!({}));
    write(&dir, "locales/en/README.md", "notes");
    let store = LocaleStore::new(dir.path().join("locales"), "en");
    assert_eq!(store.namespaces().unwrap(), vec!["common", "home"]);
}
