// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration
//!
//! Every tool reads one immutable [`I18nConfig`], assembled at startup from
//! built-in defaults, an optional profile file and the process environment
//! (environment wins). Nothing below `main` reads the environment directly.

use crate::extract::heuristic::LetterPolicy;
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_BATCH_SIZE: usize = 40;
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
pub const AUTH_KEY_ENV: &str = "DEEPL_AUTH_KEY";

const PROFILE_CANDIDATES: &[&str] = &["i18n-audit.yaml", "i18n-audit.yml", "i18n-audit.json"];
const DEFAULT_REQUIRED_LOCALES: &[&str] = &["en", "es", "zh", "fr", "de"];
const DEFAULT_REQUIRED_NAMESPACES: &[&str] = &["common", "navigation", "footer", "home", "contact"];
const DEFAULT_TARGET_LOCALES: &[&str] = &["ja", "ko", "pt", "it"];

/// Configuration problems that abort a run before any catalog is touched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required to run i18n-audit translate")]
    MissingCredential(&'static str),
    #[error("Unsupported locale for auto-translate: {0}")]
    UnmappedLocale(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Optional on-disk overrides, YAML or JSON
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct I18nProfile {
    pub locales_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub default_locale: Option<String>,
    pub required_locales: Option<Vec<String>>,
    pub required_namespaces: Option<Vec<String>>,
    pub target_locales: Option<Vec<String>>,
    pub language_codes: IndexMap<String, String>,
    pub translate_endpoint: Option<String>,
    pub inventory: PolicyProfile,
    pub lint: LintProfile,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PolicyProfile {
    pub require_letter: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LintProfile {
    pub require_letter: Option<bool>,
    pub allow: Vec<String>,
}

impl I18nProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading profile {}", path.display()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json profile {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml profile {}", path.display())),
            _ => Err(anyhow!("unsupported profile extension for {}", path.display())),
        }
    }

    /// Loads `explicit` if given, else the first profile found in `root`.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>> {
        if let Some(path) = explicit {
            return Ok(Some((path.to_path_buf(), Self::load(path)?)));
        }
        for name in PROFILE_CANDIDATES {
            let path = root.join(name);
            if path.is_file() {
                let profile = Self::load(&path)?;
                return Ok(Some((path, profile)));
            }
        }
        Ok(None)
    }
}

/// Settings for the machine-translation backfill
#[derive(Debug, Clone)]
pub struct TranslateSettings {
    pub target_locales: Vec<String>,
    pub language_codes: IndexMap<String, String>,
    pub endpoint: String,
    pub auth_key: Option<String>,
    pub batch_size: usize,
    pub timeout: Option<Duration>,
}

impl TranslateSettings {
    pub fn credential(&self) -> Result<&str, ConfigError> {
        self.auth_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential(AUTH_KEY_ENV))
    }

    /// Pairs every target locale with its service language code.
    pub fn resolve_targets(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.target_locales
            .iter()
            .map(|locale| {
                self.language_codes
                    .get(locale)
                    .map(|code| (locale.clone(), code.clone()))
                    .ok_or_else(|| ConfigError::UnmappedLocale(locale.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct LintSettings {
    pub allow: Vec<String>,
    pub policy: LetterPolicy,
}

/// Immutable per-run configuration
#[derive(Debug, Clone)]
pub struct I18nConfig {
    pub project_root: PathBuf,
    pub locales_root: PathBuf,
    pub reports_dir: PathBuf,
    pub source_dir: PathBuf,
    pub default_locale: String,
    pub required_locales: Vec<String>,
    pub required_namespaces: Vec<String>,
    pub inventory_policy: LetterPolicy,
    pub lint: LintSettings,
    pub translate: TranslateSettings,
}

impl I18nConfig {
    /// Builds the configuration from the real process environment.
    pub fn load(root: &Path, profile_path: Option<&Path>) -> Result<Self> {
        let profile = I18nProfile::discover(root, profile_path)?
            .map(|(path, profile)| {
                tracing::debug!(profile = %path.display(), "loaded profile");
                profile
            })
            .unwrap_or_default();
        Ok(Self::resolve(root, profile, |key| env::var(key).ok())?)
    }

    /// Layers `lookup` (environment) over `profile` over built-in defaults.
    pub fn resolve(
        root: &Path,
        profile: I18nProfile,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let locales_dir = var("I18N_LOCALES_DIR")
            .map(PathBuf::from)
            .or(profile.locales_dir)
            .unwrap_or_else(|| PathBuf::from("src/locales"));
        let reports_dir = var("I18N_REPORTS_DIR")
            .map(PathBuf::from)
            .or(profile.reports_dir)
            .unwrap_or_else(|| PathBuf::from("reports/i18n"));
        let source_dir = var("I18N_SOURCE_DIR")
            .map(PathBuf::from)
            .or(profile.source_dir)
            .unwrap_or_else(|| PathBuf::from("src"));
        let default_locale = var("I18N_DEFAULT_LOCALE")
            .or(profile.default_locale)
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let required_locales = var("I18N_REQUIRED_LOCALES")
            .map(|v| split_list(&v))
            .or(profile.required_locales)
            .unwrap_or_else(|| owned(DEFAULT_REQUIRED_LOCALES));
        let required_namespaces = var("I18N_REQUIRED_NAMESPACES")
            .map(|v| split_list(&v))
            .or(profile.required_namespaces)
            .unwrap_or_else(|| owned(DEFAULT_REQUIRED_NAMESPACES));
        let target_locales = var("I18N_TARGET_LOCALES")
            .map(|v| split_list(&v))
            .or(profile.target_locales)
            .unwrap_or_else(|| owned(DEFAULT_TARGET_LOCALES));

        let mut language_codes = default_language_codes();
        if let Some(variant) = var("DEEPL_PT_VARIANT") {
            language_codes.insert("pt".to_string(), variant);
        }
        language_codes.extend(profile.language_codes);

        let timeout = match var("I18N_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    key: "I18N_HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let translate = TranslateSettings {
            target_locales,
            language_codes,
            endpoint: var("DEEPL_API_URL")
                .or(profile.translate_endpoint)
                .unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.to_string()),
            auth_key: var(AUTH_KEY_ENV),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout,
        };

        Ok(Self {
            project_root: root.to_path_buf(),
            locales_root: root.join(locales_dir),
            reports_dir: root.join(reports_dir),
            source_dir: root.join(source_dir),
            default_locale,
            required_locales,
            required_namespaces,
            inventory_policy: LetterPolicy::from_flag(profile.inventory.require_letter, LetterPolicy::Required),
            lint: LintSettings {
                allow: profile.lint.allow,
                policy: LetterPolicy::from_flag(profile.lint.require_letter, LetterPolicy::Optional),
            },
            translate,
        })
    }
}

fn default_language_codes() -> IndexMap<String, String> {
    [
        ("ja", "JA"),
        ("ko", "KO"),
        ("pt", "PT-PT"),
        ("it", "IT"),
        ("es", "ES"),
        ("fr", "FR"),
        ("de", "DE"),
        ("zh", "ZH"),
    ]
    .into_iter()
    .map(|(locale, code)| (locale.to_string(), code.to_string()))
    .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
