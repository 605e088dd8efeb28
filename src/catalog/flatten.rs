// SPDX-License-Identifier: PMPL-1.0-or-later

//! Dotted-key flattening

use super::{Catalog, Leaf};
use indexmap::IndexMap;

/// Flattens a catalog into `dotted.key -> leaf`, list indices included as
/// path segments. Empty containers contribute no keys.
pub fn flatten(root: &Catalog) -> IndexMap<String, Leaf> {
    let mut out = IndexMap::new();
    walk(root, None, &mut out);
    out
}

fn walk(node: &Catalog, prefix: Option<&str>, out: &mut IndexMap<String, Leaf>) {
    match node {
        Catalog::Map(map) => {
            for (key, child) in map {
                let path = join(prefix, key);
                walk(child, Some(&path), out);
            }
        }
        Catalog::List(items) => {
            for (index, child) in items.iter().enumerate() {
                let path = join(prefix, &index.to_string());
                walk(child, Some(&path), out);
            }
        }
        Catalog::Leaf(leaf) => {
            if let Some(path) = prefix {
                out.insert(path.to_string(), leaf.clone());
            }
        }
    }
}

fn join(prefix: Option<&str>, segment: &str) -> String {
    match prefix {
        Some(p) => format!("{}.{}", p, segment),
        None => segment.to_string(),
    }
}
