//! Declared plural arity versus the locale registry.

use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

/// Warn when `Plural-Forms` declares a different `nplurals` than the
/// locale expects. A missing or unparsable field is the header rule's job.
pub fn check_plural_forms(ctx: &ValidationContext) -> Vec<Finding> {
    let Some(locale) = ctx.locale else {
        return Vec::new();
    };
    let Some(plural_forms) = ctx.catalog.header.as_ref().and_then(|h| h.plural_forms()) else {
        return Vec::new();
    };
    if plural_forms.nplurals == locale.nplurals {
        return Vec::new();
    }

    vec![
        Finding::new(
            Severity::Warning,
            Rule::PluralForms,
            format!(
                "Plural-Forms declares nplurals={} but {} ({}) has {} plural forms",
                plural_forms.nplurals, locale.code, locale.name, locale.nplurals
            ),
        )
        .at(ctx.header_location()),
    ]
}
