//! Catalog validation rules.
//!
//! Each rule is a pure function over a parsed catalog that returns
//! [`Finding`]s. Rules never modify the catalog and never stop early: every
//! finding is collected.
//!
//! ## Module Structure
//!
//! - `header`: required header fields, charset, requested language
//! - `encoding`: BOM, mis-decoded UTF-8, replacement characters
//! - `placeholder`: printf-style placeholder parity between key and translation
//! - `plural`: declared plural arity versus the locale registry
//! - `fuzzy`: entries awaiting review
//! - `untranslated`: entries without a translation
//! - `duplicate`: keys defined more than once
//! - `bidi`: direction overrides, direction marks, missing RTL script
//! - `whitespace`: leading/trailing whitespace differences

pub mod bidi;
pub mod duplicate;
pub mod encoding;
pub mod fuzzy;
pub mod header;
pub mod placeholder;
pub mod plural;
pub mod untranslated;
pub mod whitespace;

use clap::ValueEnum;

use crate::{
    core::{
        data::{Catalog, CatalogEntry, SourceLocation},
        locale::Locale,
    },
    issues::Finding,
};

/// Rule groups that can be selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ValidationRule {
    Header,
    Encoding,
    Placeholders,
    PluralForms,
    Fuzzy,
    Untranslated,
    Duplicates,
    Bidi,
    Whitespace,
}

impl ValidationRule {
    pub fn all() -> Vec<ValidationRule> {
        vec![
            ValidationRule::Header,
            ValidationRule::Encoding,
            ValidationRule::Placeholders,
            ValidationRule::PluralForms,
            ValidationRule::Fuzzy,
            ValidationRule::Untranslated,
            ValidationRule::Duplicates,
            ValidationRule::Bidi,
            ValidationRule::Whitespace,
        ]
    }
}

/// Everything a rule may look at.
pub struct ValidationContext<'a> {
    pub catalog: &'a Catalog,
    /// Path of the catalog file as displayed in findings.
    pub file_path: &'a str,
    /// Locale the catalog is validated against, when one could be resolved.
    pub locale: Option<&'static Locale>,
    /// Language explicitly requested by the caller (`--lang`).
    pub requested_lang: Option<&'a str>,
    /// The file started with a UTF-8 byte order mark.
    pub had_bom: bool,
    pub verbose: bool,
    pub strict: bool,
}

impl<'a> ValidationContext<'a> {
    pub fn new(catalog: &'a Catalog, file_path: &'a str) -> Self {
        Self {
            catalog,
            file_path,
            locale: None,
            requested_lang: None,
            had_bom: false,
            verbose: false,
            strict: false,
        }
    }

    /// Location of an entry's `msgid` line in the catalog file.
    pub fn entry_location(&self, entry: &CatalogEntry) -> Option<SourceLocation> {
        Some(SourceLocation::new(self.file_path, entry.line.unwrap_or(0)))
    }

    /// Location of the header, or the file itself when there is none.
    pub fn header_location(&self) -> Option<SourceLocation> {
        let line = self
            .catalog
            .header
            .as_ref()
            .and_then(|h| h.line)
            .unwrap_or(0);
        Some(SourceLocation::new(self.file_path, line))
    }

    /// Non-obsolete entries with a translation.
    pub fn translated_entries(&self) -> impl Iterator<Item = &'a CatalogEntry> + use<'a> {
        self.catalog
            .entries
            .iter()
            .filter(|e| !e.is_obsolete() && !e.translation.is_empty())
    }
}

/// Run the selected rules (all of them when `rules` is empty).
pub fn validate_catalog(ctx: &ValidationContext, rules: &[ValidationRule]) -> Vec<Finding> {
    let rules = if rules.is_empty() {
        ValidationRule::all()
    } else {
        rules.to_vec()
    };

    let mut findings = Vec::new();
    for rule in rules {
        match rule {
            ValidationRule::Header => findings.extend(header::check_header(ctx)),
            ValidationRule::Encoding => findings.extend(encoding::check_encoding(ctx)),
            ValidationRule::Placeholders => findings.extend(placeholder::check_placeholders(ctx)),
            ValidationRule::PluralForms => findings.extend(plural::check_plural_forms(ctx)),
            ValidationRule::Fuzzy => findings.extend(fuzzy::check_fuzzy(ctx)),
            ValidationRule::Untranslated => findings.extend(untranslated::check_untranslated(ctx)),
            ValidationRule::Duplicates => findings.extend(duplicate::check_duplicates(ctx)),
            ValidationRule::Bidi => findings.extend(bidi::check_bidi(ctx)),
            ValidationRule::Whitespace => findings.extend(whitespace::check_whitespace(ctx)),
        }
    }
    findings
}
