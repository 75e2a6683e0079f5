//! Keys defined more than once.
//!
//! Catalogs built by extraction never contain duplicates; hand-edited ones
//! can. gettext only uses the first definition, so a later definition with
//! a different translation is an error and an identical one a warning.

use std::collections::HashMap;

use super::ValidationContext;
use crate::{
    core::data::CatalogEntry,
    issues::{Finding, Rule, Severity},
};

pub fn check_duplicates(ctx: &ValidationContext) -> Vec<Finding> {
    let mut first_seen: HashMap<&str, &CatalogEntry> = HashMap::new();
    let mut findings = Vec::new();

    for entry in ctx.catalog.active_entries() {
        let Some(first) = first_seen.get(entry.key.as_str()) else {
            first_seen.insert(entry.key.as_str(), entry);
            continue;
        };

        let first_line = first
            .line
            .map(|l| format!("line {}", l))
            .unwrap_or_else(|| "an earlier entry".to_string());
        let (severity, message) = if first.translation == entry.translation {
            (
                Severity::Warning,
                format!("duplicate msgid, first defined at {}", first_line),
            )
        } else {
            (
                Severity::Error,
                format!(
                    "duplicate msgid with a different translation, first defined at {}",
                    first_line
                ),
            )
        };
        findings.push(
            Finding::new(severity, Rule::DuplicateKey, message)
                .with_key(&entry.key)
                .at(ctx.entry_location(entry)),
        );
    }

    findings
}
