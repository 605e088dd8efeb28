// SPDX-License-Identifier: PMPL-1.0-or-later

//! Syntax-tree scan for literal text in JSX sources
//!
//! Parses one source unit with oxc and records every literal sitting in a
//! user-facing position. Filtering is left to callers so the inventory and
//! the lint rule can apply their own policies to the same sites.

use crate::types::EntryKind;
use anyhow::Result;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, CallExpression, Expression, JSXAttribute, JSXAttributeName, JSXAttributeValue,
    JSXText, Program,
};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;

/// JSX attributes whose string values are shown to users
pub const TEXT_ATTRIBUTES: &[&str] = &["aria-label", "title", "placeholder", "alt"];

/// Callees whose first string argument is shown in a dialog
pub const DIALOG_CALLEES: &[&str] = &["alert"];

/// A literal in a user-facing position, before any filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    pub kind: EntryKind,
    /// Literal value as written, surrounding whitespace included
    pub text: String,
    /// Byte offset of the first non-whitespace character
    pub offset: usize,
    pub attribute: Option<String>,
}

/// Maps byte offsets to 1-based line/column pairs.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    /// Column counts characters, not bytes.
    pub fn position(&self, source: &str, offset: usize) -> (usize, usize) {
        let offset = offset.min(source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let column = source
            .get(start..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset - start);
        (line + 1, column + 1)
    }
}

/// A parsed source file handed to extractors and lint rules
pub struct SourceUnit<'p, 'a> {
    pub display_path: &'p str,
    pub source: &'a str,
    pub program: &'p Program<'a>,
    pub lines: LineIndex,
}

impl<'p, 'a> SourceUnit<'p, 'a> {
    pub fn position(&self, offset: usize) -> (usize, usize) {
        self.lines.position(self.source, offset)
    }

    pub fn literal_sites(&self) -> Vec<LiteralSite> {
        let mut collector = LiteralCollector {
            source: self.source,
            sites: Vec::new(),
        };
        collector.visit_program(self.program);
        collector.sites
    }
}

/// Parses `source` and hands the resulting unit to `f`.
///
/// The parser recovers from most syntax errors; those are logged and the
/// partial tree is still scanned.
pub fn with_source_unit<R>(
    path: &Path,
    display_path: &str,
    source: &str,
    f: impl FnOnce(&SourceUnit<'_, '_>) -> R,
) -> Result<R> {
    let source_type = SourceType::from_path(path)
        .map_err(|_| anyhow::anyhow!("unsupported source extension: {}", path.display()))?;
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type).parse();

    if parsed.panicked {
        anyhow::bail!("parser gave up on {}", display_path);
    }
    if !parsed.errors.is_empty() {
        tracing::warn!(
            file = display_path,
            errors = parsed.errors.len(),
            "source has syntax errors; scanning recovered tree"
        );
    }

    let unit = SourceUnit {
        display_path,
        source,
        program: &parsed.program,
        lines: LineIndex::new(source),
    };
    Ok(f(&unit))
}

struct LiteralCollector<'s> {
    source: &'s str,
    sites: Vec<LiteralSite>,
}

impl LiteralCollector<'_> {
    fn push(&mut self, kind: EntryKind, text: &str, offset: usize, attribute: Option<&str>) {
        self.sites.push(LiteralSite {
            kind,
            text: text.to_string(),
            offset,
            attribute: attribute.map(str::to_string),
        });
    }
}

impl<'a> Visit<'a> for LiteralCollector<'_> {
    fn visit_jsx_text(&mut self, it: &JSXText<'a>) {
        let start = it.span.start as usize;
        let end = it.span.end as usize;
        let raw = self.source.get(start..end).unwrap_or_else(|| it.value.as_str());
        let leading = raw.len() - raw.trim_start().len();
        self.push(EntryKind::TextNode, raw, start + leading, None);
    }

    fn visit_jsx_attribute(&mut self, it: &JSXAttribute<'a>) {
        if let (JSXAttributeName::Identifier(name), Some(JSXAttributeValue::StringLiteral(lit))) =
            (&it.name, &it.value)
        {
            let attr = name.name.as_str();
            if TEXT_ATTRIBUTES.contains(&attr) {
                self.push(
                    EntryKind::Attribute,
                    lit.value.as_str(),
                    lit.span.start as usize,
                    Some(attr),
                );
            }
        }
        walk::walk_jsx_attribute(self, it);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Expression::Identifier(callee) = &it.callee {
            if DIALOG_CALLEES.contains(&callee.name.as_str()) {
                match it.arguments.first() {
                    Some(Argument::StringLiteral(lit)) => {
                        self.push(
                            EntryKind::DialogText,
                            lit.value.as_str(),
                            lit.span.start as usize,
                            None,
                        );
                    }
                    Some(Argument::TemplateLiteral(tpl)) if tpl.expressions.is_empty() => {
                        if let Some(quasi) = tpl.quasis.first() {
                            let text = quasi
                                .value
                                .cooked
                                .as_ref()
                                .map(|c| c.as_str())
                                .unwrap_or_else(|| quasi.value.raw.as_str());
                            self.push(EntryKind::DialogText, text, tpl.span.start as usize, None);
                        }
                    }
                    _ => {}
                }
            }
        }
        walk::walk_call_expression(self, it);
    }
}
