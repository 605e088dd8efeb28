// SPDX-License-Identifier: PMPL-1.0-or-later

//! "Is this literal user-facing copy?" heuristic
//!
//! Shared by the inventory extractor and the lint rule. The two callers
//! differ only in whether a letter is required, which is an explicit
//! [`LetterPolicy`] rather than two drifting copies of the same checks.

use once_cell::sync::Lazy;
use regex::Regex;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.\-]*://").expect("url pattern"));
static IMAGE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^/images/").expect("image pattern"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#[0-9a-f]{3,8}$").expect("hex colour pattern"));
static NUMERIC_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s.,:%+\-]+$").expect("numeric pattern"));
static LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zÀ-ÿ\x{4e00}-\x{9fff}]").expect("letter pattern"));

/// Whether accepted text must contain at least one letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterPolicy {
    /// Inventory default: symbols-only strings such as "→" are skipped.
    Required,
    /// Lint default: anything that survives the rejection rules is reported.
    Optional,
}

impl LetterPolicy {
    pub fn from_flag(flag: Option<bool>, default: LetterPolicy) -> Self {
        match flag {
            Some(true) => LetterPolicy::Required,
            Some(false) => LetterPolicy::Optional,
            None => default,
        }
    }
}

pub fn is_probably_translatable(text: &str, policy: LetterPolicy) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || ABSOLUTE_URL.is_match(trimmed)
        || IMAGE_PATH.is_match(trimmed)
        || HEX_COLOR.is_match(trimmed)
        || NUMERIC_PUNCT.is_match(trimmed)
    {
        return false;
    }
    match policy {
        LetterPolicy::Required => LETTER.is_match(trimmed),
        LetterPolicy::Optional => true,
    }
}

/// Collapses internal whitespace runs to single spaces and trims.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
