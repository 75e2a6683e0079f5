//! Header completeness.
//!
//! Missing charset, language or plural forms are errors because tools
//! loading the catalog cannot interpret it without them. Missing
//! `MIME-Version` / `Content-Transfer-Encoding` only earn a warning.

use super::ValidationContext;
use crate::issues::{Finding, Rule, Severity};

const RECOMMENDED_FIELDS: &[&str] = &["MIME-Version", "Content-Transfer-Encoding"];

pub fn check_header(ctx: &ValidationContext) -> Vec<Finding> {
    let location = ctx.header_location();
    let error = |message: String| {
        Finding::new(Severity::Error, Rule::HeaderField, message).at(location.clone())
    };

    let Some(header) = &ctx.catalog.header else {
        return vec![error(
            "catalog has no header entry (msgid \"\")".to_string(),
        )];
    };

    let mut findings = Vec::new();

    match (header.get("Content-Type"), header.charset()) {
        (None, _) => findings.push(error("header is missing Content-Type".to_string())),
        (Some(_), None) => findings.push(error(
            "Content-Type declares no charset; expected charset=UTF-8".to_string(),
        )),
        (Some(_), Some(charset)) if charset != "utf-8" && charset != "utf8" => {
            findings.push(error(format!("charset is {}, expected UTF-8", charset)))
        }
        _ => {}
    }

    if header.language().is_none() {
        findings.push(error("header is missing Language".to_string()));
    }

    match header.get("Plural-Forms") {
        None => findings.push(error("header is missing Plural-Forms".to_string())),
        Some(value) if header.plural_forms().is_none() => findings.push(error(format!(
            "Plural-Forms has no nplurals: \"{}\"",
            value
        ))),
        Some(_) => {}
    }

    for field in RECOMMENDED_FIELDS {
        if header.get(field).is_none() {
            findings.push(
                Finding::new(
                    Severity::Warning,
                    Rule::HeaderField,
                    format!("header is missing {}", field),
                )
                .at(location.clone()),
            );
        }
    }

    if let (Some(requested), Some(declared)) = (ctx.requested_lang, header.language())
        && normalize(requested) != normalize(declared)
    {
        findings.push(
            Finding::new(
                Severity::Warning,
                Rule::LanguageMismatch,
                format!(
                    "header declares Language {} but {} was requested",
                    declared, requested
                ),
            )
            .at(location.clone()),
        );
    }

    findings
}

fn normalize(code: &str) -> String {
    code.trim().replace('-', "_").to_ascii_lowercase()
}
