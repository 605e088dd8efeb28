// SPDX-License-Identifier: PMPL-1.0-or-later

//! Path addressing for nested catalogs

use super::Catalog;
use indexmap::IndexMap;

/// True when `segment` is the canonical decimal form of a list index.
///
/// `"0"` and `"12"` qualify; `"01"`, `"-1"`, `"1.5"` and `""` do not.
pub fn is_index_segment(segment: &str) -> bool {
    segment
        .parse::<usize>()
        .map(|index| index.to_string() == segment)
        .unwrap_or(false)
}

/// Walks `path` from `root`, returning `None` as soon as a step is missing
/// or lands on something that cannot be indexed.
pub fn get_by_path<'c, S: AsRef<str>>(root: &'c Catalog, path: &[S]) -> Option<&'c Catalog> {
    let mut current = root;
    for segment in path {
        current = current.child(segment.as_ref())?;
    }
    Some(current)
}

/// Writes `value` at `path`, creating intermediate containers on the way.
///
/// A container created for segment `i` is a list when segment `i + 1` is an
/// index, otherwise a map. Nodes that cannot hold the next segment are
/// replaced. The final slot is overwritten unconditionally.
pub fn set_by_path<S: AsRef<str>>(root: &mut Catalog, path: &[S], value: Catalog) {
    let Some((last, parents)) = path.split_last() else {
        *root = value;
        return;
    };

    let mut current = root;
    for segment in parents {
        current = slot(current, segment.as_ref());
    }
    *slot(current, last.as_ref()) = value;
}

/// Returns the child slot for `segment`, making `node` a suitable container first.
fn slot<'c>(node: &'c mut Catalog, segment: &str) -> &'c mut Catalog {
    let index = if is_index_segment(segment) {
        segment.parse::<usize>().ok()
    } else {
        None
    };

    match (node, index) {
        (Catalog::List(items), Some(index)) => {
            if items.len() <= index {
                items.resize(index + 1, Catalog::null());
            }
            &mut items[index]
        }
        (Catalog::Map(map), _) => map.entry(segment.to_string()).or_insert(Catalog::null()),
        // Leaves, and lists addressed by name, become the container `segment` needs.
        (node, _) => {
            *node = container_for(segment);
            slot(node, segment)
        }
    }
}

fn container_for(segment: &str) -> Catalog {
    if is_index_segment(segment) {
        Catalog::List(Vec::new())
    } else {
        Catalog::Map(IndexMap::new())
    }
}
