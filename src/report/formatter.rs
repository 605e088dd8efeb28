// SPDX-License-Identifier: PMPL-1.0-or-later

//! Console output for each command

use crate::backfill::BackfillSummary;
use crate::lint::Diagnostic;
use crate::sync::SyncSummary;
use crate::types::{InventoryEntry, ValidationReport};
use colored::*;
use std::path::Path;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_validation(&self, report: &ValidationReport, saved_to: &Path) {
        println!("{}", "I18N VALIDATION".bold().cyan());
        println!("  Locales: {}", report.locales.join(", "));
        println!("  Namespaces: {}", report.namespaces.join(", "));

        if !report.missing_files.is_empty() {
            println!();
            println!("  {}", "Missing catalog files:".bold().red());
            for (locale, namespaces) in &report.missing_files {
                println!("    {}: {}", locale.bold(), namespaces.join(", "));
            }
        }
        self.print_buckets("Missing keys:", &report.missing);
        self.print_buckets("Extra keys:", &report.extra);

        if !report.placeholder_mismatches.is_empty() {
            println!();
            println!("  {}", "Placeholder mismatches:".bold().red());
            for m in &report.placeholder_mismatches {
                println!(
                    "    {}.{} {} [{}] vs [{}]",
                    m.locale,
                    m.namespace,
                    m.key.bold(),
                    m.base.join(", "),
                    m.localized.join(", ").yellow()
                );
            }
        }

        println!();
        if report.ok {
            println!("{}", "i18n validation ok".green().bold());
        } else {
            println!(
                "{}",
                format!("i18n validation failed. See {}", saved_to.display())
                    .red()
                    .bold()
            );
        }
    }

    fn print_buckets(&self, title: &str, buckets: &indexmap::IndexMap<String, Vec<String>>) {
        if buckets.is_empty() {
            return;
        }
        println!();
        println!("  {}", title.bold().yellow());
        for (bucket, keys) in buckets {
            println!("    {} ({})", bucket.bold(), keys.len());
            for key in keys {
                println!("      - {}", key.dimmed());
            }
        }
    }

    pub fn print_inventory(&self, entries: &[InventoryEntry], saved_to: &Path) {
        println!(
            "Wrote {} entries to {}",
            entries.len().to_string().bold(),
            saved_to.display()
        );
    }

    pub fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        for d in diagnostics {
            let severity = d.severity.to_string().blue();
            println!(
                "{}:{}:{} {} {} {}",
                d.file,
                d.line,
                d.column,
                severity,
                d.message,
                format!("({})", d.rule_id).dimmed()
            );
        }
        if diagnostics.is_empty() {
            println!("{}", "No hardcoded strings found".green());
        } else {
            println!("{} diagnostics", diagnostics.len().to_string().bold());
        }
    }

    pub fn print_sync(&self, summary: &SyncSummary) {
        for path in &summary.written {
            println!("  {} {}", "updated".green(), path.display());
        }
        println!(
            "i18n sync complete: {} written, {} unchanged",
            summary.written.len(),
            summary.unchanged
        );
    }

    pub fn print_backfill(&self, summary: &BackfillSummary) {
        for path in &summary.written {
            println!("  {} {}", "translated".green(), path.display());
        }
        println!(
            "i18n auto-translate complete ({} strings)",
            summary.translated.to_string().bold()
        );
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
