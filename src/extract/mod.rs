// SPDX-License-Identifier: PMPL-1.0-or-later

//! Inventory extraction
//!
//! Walks the source tree, scans every JSX/TSX unit plus the `index.html`
//! shell, and returns the translatable literals sorted by file and line.

pub mod heuristic;
pub mod html;
pub mod scanner;

use crate::config::I18nConfig;
use crate::types::{EntryExtra, InventoryEntry, Origin};
use anyhow::Result;
use heuristic::{is_probably_translatable, normalize_text, LetterPolicy};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "jsx"];
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist"];

/// Run a full inventory scan for the configured project
pub fn run(config: &I18nConfig) -> Result<Vec<InventoryEntry>> {
    let mut entries = Vec::new();

    let html_path = config.project_root.join("index.html");
    match read_source(&html_path) {
        Some(html) => entries.extend(html::scan_html("index.html", &html)),
        None => tracing::debug!(path = %html_path.display(), "no index.html; skipping"),
    }

    for file in collect_source_files(&config.source_dir)? {
        let Some(source) = read_source(&file) else {
            continue;
        };
        let display_name = display_path(&config.project_root, &file);
        match scan_source(&file, &display_name, &source, config.inventory_policy) {
            Ok(found) => entries.extend(found),
            Err(err) => tracing::warn!(file = %display_name, error = %err, "skipping unparsable source"),
        }
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Extract the entries of one parsed source unit
pub fn scan_source(
    path: &Path,
    display: &str,
    source: &str,
    policy: LetterPolicy,
) -> Result<Vec<InventoryEntry>> {
    scanner::with_source_unit(path, display, source, |unit| {
        unit.literal_sites()
            .into_iter()
            .filter(|site| is_probably_translatable(&site.text, policy))
            .map(|site| {
                let (line, column) = unit.position(site.offset);
                InventoryEntry {
                    text: normalize_text(&site.text),
                    origin: Origin {
                        file: display.to_string(),
                        line,
                        column,
                    },
                    kind: site.kind,
                    extra: site.attribute.map(|attribute_name| EntryExtra { attribute_name }),
                }
            })
            .collect()
    })
}

/// Sort by file path, then line; ties keep discovery order.
pub fn sort_entries(entries: &mut [InventoryEntry]) {
    entries.sort_by(|a, b| {
        a.origin
            .file
            .cmp(&b.origin.file)
            .then(a.origin.line.cmp(&b.origin.line))
    });
}

/// Source files under `dir`, sorted, skipping build and dependency folders
pub fn collect_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("source directory does not exist: {}", dir.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| SKIPPED_DIRS.contains(&name))
                    .unwrap_or(false))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_source_file(path))
        .collect();

    files.sort();
    Ok(files)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// `path` relative to `root` with forward slashes.
pub fn display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reads text as UTF-8, falling back to Windows-1252.
pub fn read_source(path: &Path) -> Option<String> {
    let raw_bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file");
            }
            return None;
        }
    };

    match String::from_utf8(raw_bytes) {
        Ok(s) => Some(s),
        Err(err) => {
            let bytes = err.into_bytes();
            let (cow, _, had_errors) = encoding_rs::WINDOWS_1252.decode(&bytes);
            if had_errors {
                tracing::warn!(path = %path.display(), "skipping non-text file");
                return None;
            }
            Some(cow.into_owned())
        }
    }
}
