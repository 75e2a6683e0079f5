//! printf-style placeholder parity.
//!
//! Applies to entries flagged `<kind>-format`. A count mismatch is reported
//! once; order is only compared when the counts agree.

use std::sync::LazyLock;

use regex::Regex;

use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?:\(([^)]*)\))?[-#0+]*(?:\d+|\*)?(?:\.\d+)?([diouxXeEfFgGcrsa%])").unwrap()
});

/// One conversion found in a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: Option<String>,
    pub conversion: char,
}

impl Placeholder {
    /// Conversion with `%i`/`%u` folded into `%d`.
    fn normalized_conversion(&self) -> char {
        match self.conversion {
            'i' | 'u' => 'd',
            c => c,
        }
    }
}

/// Placeholders of `text` in order; `%%` is skipped.
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let conversion = caps.get(2)?.as_str().chars().next()?;
            if conversion == '%' {
                return None;
            }
            Some(Placeholder {
                name: caps.get(1).map(|m| m.as_str().to_string()),
                conversion,
            })
        })
        .collect()
}

/// Differences between the placeholders of a key and its translation, as
/// `(rule, message)` pairs.
pub fn compare_placeholders(key: &str, translation: &str) -> Vec<(Rule, String)> {
    let expected = placeholders(key);
    let found = placeholders(translation);
    let mut problems = Vec::new();

    if expected.len() != found.len() {
        problems.push((
            Rule::PlaceholderCount,
            format!(
                "placeholder count mismatch: expected {}, found {}",
                expected.len(),
                found.len()
            ),
        ));
    }

    let mut reported = Vec::new();
    for name in expected.iter().filter_map(|p| p.name.as_deref()) {
        if reported.contains(&name) {
            continue;
        }
        if !found.iter().any(|p| p.name.as_deref() == Some(name)) {
            problems.push((
                Rule::PlaceholderNamed,
                format!("named placeholder %({}) is missing from the translation", name),
            ));
        }
        reported.push(name);
    }

    let positional = |list: &[Placeholder]| -> Vec<char> {
        list.iter()
            .filter(|p| p.name.is_none())
            .map(Placeholder::normalized_conversion)
            .collect()
    };
    let expected_order = positional(&expected);
    let found_order = positional(&found);
    if expected.len() == found.len()
        && expected_order.len() == found_order.len()
        && expected_order != found_order
    {
        problems.push((
            Rule::PlaceholderOrder,
            format!(
                "positional placeholders out of order: expected {}, found {}",
                render(&expected_order),
                render(&found_order)
            ),
        ));
    }

    problems
}

fn render(conversions: &[char]) -> String {
    conversions
        .iter()
        .map(|c| format!("%{}", c))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn check_placeholders(ctx: &ValidationContext) -> Vec<Finding> {
    let mut findings = Vec::new();
    for entry in ctx.translated_entries() {
        if entry.format_kinds().next().is_none() {
            continue;
        }
        for (rule, message) in compare_placeholders(&entry.key, &entry.translation) {
            findings.push(
                Finding::new(Severity::Error, rule, message)
                    .with_key(&entry.key)
                    .at(ctx.entry_location(entry)),
            );
        }
    }
    findings
}
