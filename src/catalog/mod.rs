// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog tree model
//!
//! A catalog is one namespace's translations for one locale: a tree of
//! ordered maps, lists and scalar leaves. It round-trips through
//! `serde_json::Value` so on-disk key order survives a load/save cycle.

pub mod flatten;
pub mod path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub use flatten::flatten;
pub use path::{get_by_path, is_index_segment, set_by_path};

/// Scalar value at the bottom of a catalog tree
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Leaf {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Leaf::String(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form used when comparing a localized value against baseline text.
    pub fn to_text(&self) -> String {
        match self {
            Leaf::Null => "null".to_string(),
            Leaf::Bool(b) => b.to_string(),
            Leaf::Number(n) => n.to_string(),
            Leaf::String(s) => s.clone(),
        }
    }
}

/// Recursive translation tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Catalog {
    Leaf(Leaf),
    List(Vec<Catalog>),
    Map(IndexMap<String, Catalog>),
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::empty()
    }
}

impl Catalog {
    /// The `{}` catalog substituted for absent or unreadable files.
    pub fn empty() -> Self {
        Catalog::Map(IndexMap::new())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Catalog::Leaf(Leaf::String(text.into()))
    }

    pub fn null() -> Self {
        Catalog::Leaf(Leaf::Null)
    }

    pub fn is_plain_object(&self) -> bool {
        matches!(self, Catalog::Map(_))
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Catalog>> {
        match self {
            Catalog::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Catalog]> {
        match self {
            Catalog::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Catalog::Leaf(leaf) => leaf.as_str(),
            _ => None,
        }
    }

    /// Looks up a direct child by map key or list index.
    pub fn child(&self, segment: &str) -> Option<&Catalog> {
        match self {
            Catalog::Map(map) => map.get(segment),
            Catalog::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Catalog::Leaf(_) => None,
        }
    }

    /// Pretty JSON with two-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> String {
        let value = Value::from(self.clone());
        // Serializing a Value cannot fail: every key is already a string.
        let mut raw = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        raw.push('\n');
        raw
    }
}

/// Whether a (possibly absent) node still counts as untranslated.
///
/// Null, blank strings, empty lists and empty maps are all empty. Numbers
/// and booleans never are.
pub fn is_empty(node: Option<&Catalog>) -> bool {
    match node {
        None => true,
        Some(Catalog::Leaf(Leaf::Null)) => true,
        Some(Catalog::Leaf(Leaf::String(s))) => s.trim().is_empty(),
        Some(Catalog::Leaf(_)) => false,
        Some(Catalog::List(items)) => items.is_empty(),
        Some(Catalog::Map(map)) => map.is_empty(),
    }
}

impl From<Value> for Catalog {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Catalog::Leaf(Leaf::Null),
            Value::Bool(b) => Catalog::Leaf(Leaf::Bool(b)),
            Value::Number(n) => Catalog::Leaf(Leaf::Number(n)),
            Value::String(s) => Catalog::Leaf(Leaf::String(s)),
            Value::Array(items) => Catalog::List(items.into_iter().map(Catalog::from).collect()),
            Value::Object(map) => Catalog::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Catalog::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Catalog> for Value {
    fn from(catalog: Catalog) -> Self {
        match catalog {
            Catalog::Leaf(Leaf::Null) => Value::Null,
            Catalog::Leaf(Leaf::Bool(b)) => Value::Bool(b),
            Catalog::Leaf(Leaf::Number(n)) => Value::Number(n),
            Catalog::Leaf(Leaf::String(s)) => Value::String(s),
            Catalog::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Catalog::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
