// SPDX-License-Identifier: PMPL-1.0-or-later

//! Built-in lint rules

use super::{Diagnostic, Rule, Severity};
use crate::extract::heuristic::{is_probably_translatable, LetterPolicy};
use crate::extract::scanner::SourceUnit;
use crate::types::EntryKind;
use std::collections::HashSet;

pub const NO_LITERAL_STRINGS_IN_JSX: &str = "no-literal-strings-in-jsx";
pub const USE_TRANSLATION_MESSAGE: &str =
    "Avoid hardcoded user-facing strings; use i18n translations instead.";

/// Flags hard-coded JSX text and user-facing attribute literals.
///
/// `alert(...)` arguments are not checked; only markup is.
pub struct NoLiteralStringsInJsx {
    allow: HashSet<String>,
    policy: LetterPolicy,
}

impl NoLiteralStringsInJsx {
    pub fn new<I, S>(allow: I, policy: LetterPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow: allow.into_iter().map(Into::into).collect(),
            policy,
        }
    }
}

impl Rule for NoLiteralStringsInJsx {
    fn id(&self) -> &'static str {
        NO_LITERAL_STRINGS_IN_JSX
    }

    fn description(&self) -> &'static str {
        "Discourage hardcoded user-facing strings in JSX."
    }

    fn severity(&self) -> Severity {
        Severity::Suggestion
    }

    fn check(&self, unit: &SourceUnit<'_, '_>) -> Vec<Diagnostic> {
        unit.literal_sites()
            .into_iter()
            .filter(|site| matches!(site.kind, EntryKind::TextNode | EntryKind::Attribute))
            .filter(|site| is_probably_translatable(&site.text, self.policy))
            .filter(|site| !self.allow.contains(site.text.trim()))
            .map(|site| {
                let (line, column) = unit.position(site.offset);
                Diagnostic {
                    rule_id: self.id().to_string(),
                    severity: self.severity(),
                    message: USE_TRANSLATION_MESSAGE.to_string(),
                    file: unit.display_path.to_string(),
                    line,
                    column,
                }
            })
            .collect()
    }
}
