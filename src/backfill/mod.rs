// SPDX-License-Identifier: PMPL-1.0-or-later

//! Machine-translation backfill
//!
//! A baseline string whose locale counterpart is absent, null, or still the
//! baseline text verbatim has never been translated. Those leaves are sent
//! to the translator in fixed-size batches and written back in place.
//!
//! Any failure aborts the run. Namespaces already written stay written.

pub mod translator;

use crate::catalog::{set_by_path, Catalog, Leaf};
use crate::config::{ConfigError, I18nConfig};
use crate::store::LocaleStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub use translator::{DeepLTranslator, TranslateError, Translator};

/// An untranslated baseline leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: Vec<String>,
    pub text: String,
}

/// Untranslated leaves of `locale`, in baseline traversal order.
pub fn collect_candidates(base: &Catalog, locale: &Catalog) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    walk(base, Some(locale), &mut prefix, &mut out);
    out
}

fn walk(base: &Catalog, local: Option<&Catalog>, prefix: &mut Vec<String>, out: &mut Vec<Candidate>) {
    match base {
        Catalog::Leaf(Leaf::String(text)) => {
            let untranslated = match local {
                None | Some(Catalog::Leaf(Leaf::Null)) => true,
                Some(Catalog::Leaf(leaf)) => leaf.to_text() == *text,
                Some(_) => false,
            };
            if untranslated {
                out.push(Candidate {
                    path: prefix.clone(),
                    text: text.clone(),
                });
            }
        }
        Catalog::Leaf(_) => {}
        Catalog::List(items) => {
            for (index, item) in items.iter().enumerate() {
                let local_item = local.and_then(Catalog::as_list).and_then(|l| l.get(index));
                prefix.push(index.to_string());
                walk(item, local_item, prefix, out);
                prefix.pop();
            }
        }
        Catalog::Map(map) => {
            for (key, child) in map {
                let local_child = local.and_then(Catalog::as_map).and_then(|m| m.get(key));
                prefix.push(key.clone());
                walk(child, local_child, prefix, out);
                prefix.pop();
            }
        }
    }
}

/// Translates the untranslated leaves of one namespace into `current`.
///
/// Returns how many leaves were written; zero means no request was made.
pub fn backfill_namespace(
    base: &Catalog,
    current: &mut Catalog,
    target_lang: &str,
    batch_size: usize,
    translator: &dyn Translator,
) -> Result<usize, TranslateError> {
    let candidates = collect_candidates(base, current);
    if candidates.is_empty() {
        return Ok(0);
    }

    for chunk in candidates.chunks(batch_size.max(1)) {
        let texts: Vec<String> = chunk.iter().map(|c| c.text.clone()).collect();
        let translated = translator.translate_batch(&texts, target_lang)?;
        if translated.len() != chunk.len() {
            return Err(TranslateError::MalformedResponse(format!(
                "expected {} translations, got {}",
                chunk.len(),
                translated.len()
            )));
        }
        for (candidate, text) in chunk.iter().zip(translated) {
            set_by_path(current, &candidate.path, Catalog::string(text));
        }
    }

    Ok(candidates.len())
}

/// Per-locale outcome of a backfill run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub translated: usize,
    pub written: Vec<PathBuf>,
}

/// Backfill every configured target locale
pub fn run(config: &I18nConfig, translator: &dyn Translator) -> Result<BackfillSummary> {
    let targets = config.translate.resolve_targets()?;
    backfill_store(
        &LocaleStore::from_config(config),
        &targets,
        config.translate.batch_size,
        translator,
    )
}

/// `targets` pairs each locale with its service language code.
pub fn backfill_store(
    store: &LocaleStore,
    targets: &[(String, String)],
    batch_size: usize,
    translator: &dyn Translator,
) -> Result<BackfillSummary> {
    if let Some((locale, _)) = targets.iter().find(|(l, _)| l == store.default_locale()) {
        return Err(ConfigError::InvalidValue {
            key: "I18N_TARGET_LOCALES",
            value: format!("{} is the default locale", locale),
        }
        .into());
    }

    let namespaces = store.namespaces()?;
    let mut summary = BackfillSummary::default();

    for (locale, target_lang) in targets {
        for namespace in &namespaces {
            let base = store.read_or_empty(store.default_locale(), namespace);
            let mut current = store.read_or_empty(locale, namespace);

            let count = backfill_namespace(&base, &mut current, target_lang, batch_size, translator)
                .with_context(|| format!("translating {}/{}", locale, namespace))?;
            if count == 0 {
                continue;
            }

            let path = store.write(locale, namespace, &current)?;
            tracing::info!(locale = %locale, namespace = %namespace, count, "backfilled translations");
            summary.translated += count;
            summary.written.push(path);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Upper-cases text and records every batch it receives.
    #[derive(Default)]
    struct Shouting {
        batches: RefCell<Vec<(Vec<String>, String)>>,
    }

    impl Translator for Shouting {
        fn translate_batch(
            &self,
            texts: &[String],
            target_lang: &str,
        ) -> Result<Vec<String>, TranslateError> {
            self.batches
                .borrow_mut()
                .push((texts.to_vec(), target_lang.to_string()));
            Ok(texts.iter().map(|t| t.to_uppercase()).collect())
        }
    }

    struct ShortChanging;

    impl Translator for ShortChanging {
        fn translate_batch(&self, _: &[String], _: &str) -> Result<Vec<String>, TranslateError> {
            Ok(vec![])
        }
    }

    #[test]
    fn candidates_skip_translated_leaves() {
        let base = Catalog::from(json!({"greeting": "Hello", "cta": "Book"}));
        let locale = Catalog::from(json!({"greeting": "Bonjour"}));
        assert_eq!(
            collect_candidates(&base, &locale),
            vec![Candidate {
                path: vec!["cta".into()],
                text: "Book".into()
            }]
        );
    }

    #[test]
    fn candidates_include_copied_and_null_values_in_order() {
        let base = Catalog::from(json!({
            "nav": {"home": "Home", "about": "About"},
            "slides": ["Reef", "Beach"],
            "year": 2024
        }));
        let locale = Catalog::from(json!({
            "nav": {"home": "Home", "about": "À propos"},
            "slides": [null]
        }));
        let paths: Vec<_> = collect_candidates(&base, &locale)
            .into_iter()
            .map(|c| c.path.join("."))
            .collect();
        assert_eq!(paths, vec!["nav.home", "slides.0", "slides.1"]);
    }

    #[test]
    fn batches_are_sequential_and_written_back() {
        let mut base = serde_json::Map::new();
        for i in 0..5 {
            base.insert(format!("k{}", i), json!(format!("text {}", i)));
        }
        let base = Catalog::from(serde_json::Value::Object(base));
        let mut current = Catalog::empty();
        let translator = Shouting::default();

        let count = backfill_namespace(&base, &mut current, "JA", 2, &translator).unwrap();
        assert_eq!(count, 5);
        let sizes: Vec<_> = translator.batches.borrow().iter().map(|(b, _)| b.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(translator.batches.borrow()[2].0, vec!["text 4"]);
        assert_eq!(translator.batches.borrow()[0].1, "JA");
        assert_eq!(current.child("k3").and_then(Catalog::as_str), Some("TEXT 3"));
    }

    #[test]
    fn nothing_to_do_makes_no_request() {
        let base = Catalog::from(json!({"a": "A"}));
        let mut current = Catalog::from(json!({"a": "Ä"}));
        let translator = Shouting::default();
        assert_eq!(backfill_namespace(&base, &mut current, "DE", 40, &translator).unwrap(), 0);
        assert!(translator.batches.borrow().is_empty());
    }

    #[test]
    fn short_response_is_fatal() {
        let base = Catalog::from(json!({"a": "A"}));
        let mut current = Catalog::empty();
        let err = backfill_namespace(&base, &mut current, "DE", 40, &ShortChanging).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedResponse(_)));
    }
}
