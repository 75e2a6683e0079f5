//! Bidirectional text problems.

use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

/// LEFT-TO-RIGHT OVERRIDE and RIGHT-TO-LEFT OVERRIDE: they reorder the
/// rest of the string when displayed.
const OVERRIDES: &[char] = &['\u{202D}', '\u{202E}'];

const DIRECTION_MARKS: &[char] = &[
    '\u{200E}', // LEFT-TO-RIGHT MARK
    '\u{200F}', // RIGHT-TO-LEFT MARK
    '\u{061C}', // ARABIC LETTER MARK
    '\u{202A}', // LEFT-TO-RIGHT EMBEDDING
    '\u{202B}', // RIGHT-TO-LEFT EMBEDDING
    '\u{202C}', // POP DIRECTIONAL FORMATTING
    '\u{2066}', // LEFT-TO-RIGHT ISOLATE
    '\u{2067}', // RIGHT-TO-LEFT ISOLATE
    '\u{2068}', // FIRST STRONG ISOLATE
    '\u{2069}', // POP DIRECTIONAL ISOLATE
];

/// Hebrew, Arabic, Syriac, Thaana, N'Ko and the Arabic/Hebrew
/// presentation forms.
pub fn is_rtl_script(c: char) -> bool {
    matches!(c,
        '\u{0590}'..='\u{08FF}'
        | '\u{FB1D}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}'
        | '\u{10800}'..='\u{10FFF}'
        | '\u{1E800}'..='\u{1EFFF}'
    )
}

pub fn check_bidi(ctx: &ValidationContext) -> Vec<Finding> {
    let rtl_locale = ctx.locale.filter(|l| l.rtl);
    let mut findings = Vec::new();

    for entry in ctx.translated_entries() {
        let translation = &entry.translation;
        let finding = |severity, rule, message: String| {
            Finding::new(severity, rule, message)
                .with_key(&entry.key)
                .at(ctx.entry_location(entry))
        };

        if translation.contains(OVERRIDES) {
            findings.push(finding(
                Severity::Error,
                Rule::BidiOverride,
                "translation contains a bidirectional override character (U+202D/U+202E)"
                    .to_string(),
            ));
        }

        let marks: Vec<String> = DIRECTION_MARKS
            .iter()
            .filter(|m| translation.contains(**m))
            .map(|m| format!("U+{:04X}", *m as u32))
            .collect();
        if !marks.is_empty() {
            findings.push(finding(
                Severity::Info,
                Rule::DirectionMark,
                format!(
                    "translation contains direction control characters ({}); they are rarely needed",
                    marks.join(", ")
                ),
            ));
        }

        if let Some(locale) = rtl_locale
            && translation.trim().chars().count() > 2
            && !translation.chars().any(is_rtl_script)
        {
            findings.push(finding(
                Severity::Warning,
                Rule::RtlScript,
                format!(
                    "{} translation contains no right-to-left script characters",
                    locale.name
                ),
            ));
        }
    }

    findings
}
