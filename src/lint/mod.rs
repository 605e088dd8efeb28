// SPDX-License-Identifier: PMPL-1.0-or-later

//! Authoring-time lint
//!
//! A small rule registry run over parsed sources. Rules are advisory: they
//! produce diagnostics, never a failing exit status.

pub mod rules;

use crate::config::I18nConfig;
use crate::extract::{self, scanner};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use rules::NoLiteralStringsInJsx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Suggestion,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Suggestion => write!(f, "suggestion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
}

/// A check run against one parsed source unit
pub trait Rule {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn severity(&self) -> Severity;
    fn check(&self, unit: &scanner::SourceUnit<'_, '_>) -> Vec<Diagnostic>;
}

/// Registered rules, run in registration order
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry configured for this project.
    pub fn from_config(config: &I18nConfig) -> Self {
        let mut set = Self::new();
        set.register(NoLiteralStringsInJsx::new(
            config.lint.allow.iter().cloned(),
            config.lint.policy,
        ));
        set
    }

    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn check_unit(&self, unit: &scanner::SourceUnit<'_, '_>) -> Vec<Diagnostic> {
        self.rules.iter().flat_map(|rule| rule.check(unit)).collect()
    }

    /// Parse and lint one source text.
    pub fn check_source(&self, path: &Path, display: &str, source: &str) -> Result<Vec<Diagnostic>> {
        scanner::with_source_unit(path, display, source, |unit| self.check_unit(unit))
    }
}

/// Lints the given files or directories (the source dir when empty).
pub fn run(config: &I18nConfig, targets: &[PathBuf]) -> Result<Vec<Diagnostic>> {
    let rules = RuleSet::from_config(config);
    let mut files = Vec::new();
    if targets.is_empty() {
        files = extract::collect_source_files(&config.source_dir)?;
    } else {
        for target in targets {
            if target.is_dir() {
                files.extend(extract::collect_source_files(target)?);
            } else {
                files.push(target.clone());
            }
        }
    }

    let mut diagnostics = Vec::new();
    for file in &files {
        let Some(source) = extract::read_source(file) else {
            continue;
        };
        let display_name = extract::display_path(&config.project_root, file);
        match rules.check_source(file, &display_name, &source) {
            Ok(found) => diagnostics.extend(found),
            Err(err) => tracing::warn!(file = %display_name, error = %err, "skipping unparsable source"),
        }
    }
    Ok(diagnostics)
}
