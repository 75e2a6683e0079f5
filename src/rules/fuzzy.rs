use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

/// Fuzzy translations are never shown to users; each one is a warning.
pub fn check_fuzzy(ctx: &ValidationContext) -> Vec<Finding> {
    ctx.catalog
        .active_entries()
        .filter(|e| e.is_fuzzy())
        .map(|entry| {
            Finding::new(
                Severity::Warning,
                Rule::Fuzzy,
                "translation is marked fuzzy and falls back to the source string",
            )
            .with_key(&entry.key)
            .at(ctx.entry_location(entry))
        })
        .collect()
}
