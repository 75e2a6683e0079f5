//! Entries without a translation.
//!
//! Normally silent: the reporter counts them. Verbose mode lists them as
//! info, strict mode turns them into errors.

use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

pub fn check_untranslated(ctx: &ValidationContext) -> Vec<Finding> {
    let severity = if ctx.strict {
        Severity::Error
    } else if ctx.verbose {
        Severity::Info
    } else {
        return Vec::new();
    };

    ctx.catalog
        .active_entries()
        .filter(|e| e.translation.is_empty())
        .map(|entry| {
            Finding::new(severity, Rule::Untranslated, "entry has no translation")
                .with_key(&entry.key)
                .at(ctx.entry_location(entry))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::test_support::*;

    fn sample() -> crate::core::data::Catalog {
        catalog(&format!(
            "{}\nmsgid \"Save\"\nmsgstr \"\"\n\nmsgid \"Open\"\nmsgstr \"فتح\"\n\n#~ msgid \"Old\"\n#~ msgstr \"\"\n",
            AR_HEADER
        ))
    }

    #[test]
    fn test_silent_by_default() {
        let catalog = sample();
        let ctx = ValidationContext::new(&catalog, "ar.po");
        assert_eq!(check_untranslated(&ctx), vec![]);
    }

    #[test]
    fn test_verbose_and_strict_severity() {
        let catalog = sample();
        let mut ctx = ValidationContext::new(&catalog, "ar.po");
        ctx.verbose = true;
        let findings = check_untranslated(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);

        ctx.strict = true;
        let findings = check_untranslated(&ctx);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].key.as_deref(), Some("Save"));
    }
}
