// SPDX-License-Identifier: PMPL-1.0-or-later

//! Interpolation placeholders (`{{name}}`)

use crate::catalog::Leaf;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern"));

/// Distinct placeholder names in first-occurrence order; non-strings have none.
pub fn placeholders_of(value: &Leaf) -> IndexSet<String> {
    match value {
        Leaf::String(text) => PLACEHOLDER
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect(),
        _ => IndexSet::new(),
    }
}

/// Set equality, ignoring order and repeats.
pub fn same_placeholders(a: &IndexSet<String>, b: &IndexSet<String>) -> bool {
    a.len() == b.len() && a.iter().all(|name| b.contains(name))
}
