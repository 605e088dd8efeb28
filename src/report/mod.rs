// SPDX-License-Identifier: PMPL-1.0-or-later

//! Report generation module
//!
//! Everything lands in the reports directory (`reports/i18n` by default):
//! `validate.json`, `missing-keys.json`, `inventory.json` and `summary.md`.

pub mod formatter;
pub mod sarif;

use crate::store::write_raw;
use crate::types::{InventoryEntry, ValidationReport};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub use formatter::ReportFormatter;

pub const VALIDATE_REPORT: &str = "validate.json";
pub const MISSING_REPORT: &str = "missing-keys.json";
pub const INVENTORY_REPORT: &str = "inventory.json";
pub const SUMMARY_REPORT: &str = "summary.md";

/// Pretty JSON with a trailing newline, parents created as needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_raw(path, &json)
}

pub fn write_validation(reports_dir: &Path, report: &ValidationReport) -> Result<PathBuf> {
    let path = reports_dir.join(VALIDATE_REPORT);
    write_json(&path, report)?;
    Ok(path)
}

/// Copies the `missing` map of the last validation report into
/// `missing-keys.json`. Returns the output path and the bucket count.
pub fn extract_missing(reports_dir: &Path) -> Result<(PathBuf, usize)> {
    let source = reports_dir.join(VALIDATE_REPORT);
    let raw = fs::read_to_string(&source).with_context(|| {
        format!("reading {} (run `i18n-audit validate` first)", source.display())
    })?;
    let report: Value =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", source.display()))?;

    let missing = match report.get("missing") {
        None | Some(Value::Null) => Value::Object(Default::default()),
        Some(Value::Object(map)) => Value::Object(map.clone()),
        Some(other) => bail!("{}: `missing` is not an object: {}", source.display(), other),
    };
    let buckets = missing.as_object().map_or(0, |m| m.len());

    let path = reports_dir.join(MISSING_REPORT);
    write_json(&path, &missing)?;
    Ok((path, buckets))
}

/// Writes `inventory.json` and `summary.md`; returns the inventory path.
pub fn write_inventory(
    reports_dir: &Path,
    entries: &[InventoryEntry],
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = reports_dir.join(INVENTORY_REPORT);
    write_json(&path, entries)?;
    write_raw(
        &reports_dir.join(SUMMARY_REPORT),
        &render_summary(entries, generated_at),
    )?;
    Ok(path)
}

/// Bucket used by the summary: `src/<a>/<b>` under `src`, else the file.
pub fn summary_bucket(file: &str) -> String {
    let parts: Vec<&str> = file.split('/').collect();
    if parts.first() == Some(&"src") {
        parts.into_iter().take(3).collect::<Vec<_>>().join("/")
    } else {
        file.to_string()
    }
}

/// Entry counts per bucket, by descending count then name.
pub fn summary_buckets(entries: &[InventoryEntry]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for entry in entries {
        *counts.entry(summary_bucket(&entry.origin.file)).or_default() += 1;
    }
    let mut buckets: Vec<_> = counts.into_iter().collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    buckets
}

pub fn render_summary(entries: &[InventoryEntry], generated_at: DateTime<Utc>) -> String {
    let mut out = String::from("# i18n Inventory Summary\n\n");
    out.push_str(&format!("Generated: {}\n", generated_at.to_rfc3339()));
    out.push_str(&format!("Total entries: {}\n\n", entries.len()));
    for (bucket, count) in summary_buckets(entries) {
        out.push_str(&format!("- {}: {}\n", bucket, count));
    }
    out
}
