//! Encoding artifacts in translations.

use std::sync::LazyLock;

use regex::Regex;

use super::ValidationContext;
use crate::{
    core::data::SourceLocation,
    issues::{Finding, Rule, Severity},
};

/// UTF-8 bytes of a 2- or 3-byte sequence read back as Latin-1/cp1252:
/// a lead byte (`Â`..`ß` or `à`..`ï`) followed by continuation bytes, which
/// show up as U+0080..U+00BF or the cp1252 glyphs of 0x80..0x9F.
static MOJIBAKE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let continuation = "[\u{80}-\u{BF}€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ]";
    Regex::new(&format!(
        "[\u{C2}-\u{DF}]{c}|[\u{E0}-\u{EF}]{c}{c}",
        c = continuation
    ))
    .unwrap()
});

const REPLACEMENT_CHAR: char = '\u{FFFD}';

pub fn check_encoding(ctx: &ValidationContext) -> Vec<Finding> {
    let mut findings = Vec::new();

    if ctx.had_bom {
        findings.push(
            Finding::new(
                Severity::Warning,
                Rule::Bom,
                "file starts with a UTF-8 byte order mark",
            )
            .at(Some(SourceLocation::new(ctx.file_path, 1))),
        );
    }

    for entry in ctx.translated_entries() {
        if let Some(artifact) = find_mojibake(&entry.translation) {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Rule::Mojibake,
                    format!(
                        "translation looks like mis-decoded UTF-8 (\"{}\"); save the file as UTF-8",
                        artifact
                    ),
                )
                .with_key(&entry.key)
                .at(ctx.entry_location(entry)),
            );
        }
        if entry.translation.contains(REPLACEMENT_CHAR) {
            findings.push(
                Finding::new(
                    Severity::Error,
                    Rule::ReplacementChar,
                    "translation contains U+FFFD replacement characters",
                )
                .with_key(&entry.key)
                .at(ctx.entry_location(entry)),
            );
        }
    }

    findings
}

/// First mojibake signature in `text`, if any.
pub fn find_mojibake(text: &str) -> Option<&str> {
    MOJIBAKE_REGEX.find(text).map(|m| m.as_str())
}
