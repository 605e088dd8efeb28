// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core report types shared by the extractor, validator and report writers

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Syntactic position a translatable literal was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Literal text between JSX tags
    TextNode,
    /// String value of a user-facing JSX attribute
    Attribute,
    /// First argument of `alert(...)`
    DialogText,
    /// `<title>` of index.html
    HtmlTitle,
    /// `<meta name="description">` of index.html
    HtmlMeta,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::TextNode => "text-node",
            EntryKind::Attribute => "attribute",
            EntryKind::DialogText => "dialog-text",
            EntryKind::HtmlTitle => "html-title",
            EntryKind::HtmlMeta => "html-meta",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based source location, file relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryExtra {
    pub attribute_name: String,
}

/// One translatable literal discovered by the inventory scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub text: String,
    pub origin: Origin,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<EntryExtra>,
}

/// A key whose placeholder names differ between baseline and locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderMismatch {
    pub locale: String,
    pub namespace: String,
    pub key: String,
    pub base: Vec<String>,
    pub localized: Vec<String>,
}

/// Point-in-time result of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub ok: bool,
    pub locales: Vec<String>,
    pub namespaces: Vec<String>,
    pub missing_files: IndexMap<String, Vec<String>>,
    pub missing: IndexMap<String, Vec<String>>,
    pub extra: IndexMap<String, Vec<String>>,
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl ValidationReport {
    pub fn new(locales: Vec<String>, namespaces: Vec<String>) -> Self {
        Self {
            ok: true,
            locales,
            namespaces,
            missing_files: IndexMap::new(),
            missing: IndexMap::new(),
            extra: IndexMap::new(),
            placeholder_mismatches: Vec::new(),
        }
    }

    /// Bucket key used by the `missing` and `extra` maps.
    pub fn bucket(locale: &str, namespace: &str) -> String {
        format!("{}.{}", locale, namespace)
    }
}
