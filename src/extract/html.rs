// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document title and meta description from `index.html`

use super::heuristic::normalize_text;
use super::scanner::LineIndex;
use crate::types::{EntryKind, InventoryEntry, Origin};
use once_cell::sync::Lazy;
use regex::Regex;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title>([^<]+)</title>").expect("title pattern"));
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta\s+name=['"]description['"]\s+content=['"]([^'"]+)['"][^>]*>"#)
        .expect("meta pattern")
});

/// Scans an HTML shell; `display_path` is recorded as the entry file.
pub fn scan_html(display_path: &str, html: &str) -> Vec<InventoryEntry> {
    let lines = LineIndex::new(html);
    let mut entries = Vec::new();

    for (pattern, kind) in [
        (&*TITLE, EntryKind::HtmlTitle),
        (&*META_DESCRIPTION, EntryKind::HtmlMeta),
    ] {
        let Some(group) = pattern.captures(html).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let text = normalize_text(group.as_str());
        if text.is_empty() {
            continue;
        }
        let leading = group.as_str().len() - group.as_str().trim_start().len();
        let (line, column) = lines.position(html, group.start() + leading);
        entries.push(InventoryEntry {
            text,
            origin: Origin {
                file: display_path.to_string(),
                line,
                column,
            },
            kind,
            extra: None,
        });
    }

    entries
}
