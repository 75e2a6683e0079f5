use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::ValidateCommand;
use super::{
    CommandResult, CommandSummary, ValidateSummary,
    helper::{finish, normalize_lang},
};
use crate::{
    core::{
        locale::{self, Locale},
        po::{parse, strip_bom},
    },
    issues::{Issue, ParseErrorIssue},
    rules::{ValidationContext, validate_catalog},
};

pub fn validate(cmd: ValidateCommand) -> Result<CommandResult> {
    let path = &cmd.catalog;
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let (text, had_bom) = strip_bom(&text);
    let display_path = path.display().to_string();

    let requested = cmd.lang.as_deref().map(normalize_lang);
    let requested_locale = requested.as_deref().map(locale::lookup).transpose()?;

    let catalog = match parse(text) {
        Ok(catalog) => catalog,
        Err(e) => {
            let issue = ParseErrorIssue::from_parse_error(display_path.clone(), &e);
            return Ok(finish(
                CommandSummary::Validate(ValidateSummary {
                    catalog_path: display_path,
                    entry_count: 0,
                    language: requested,
                }),
                vec![Issue::ParseError(issue)],
                1,
                true,
            ));
        }
    };

    let locale = match requested_locale {
        Some(locale) => Some(locale),
        None => match catalog.language() {
            Some(code) => header_locale(code),
            None => locale_from_file_name(path),
        },
    };

    let mut ctx = ValidationContext::new(&catalog, &display_path);
    ctx.locale = locale;
    ctx.requested_lang = requested.as_deref();
    ctx.had_bom = had_bom;
    ctx.verbose = cmd.common.verbose;
    ctx.strict = cmd.strict;

    let issues: Vec<Issue> = validate_catalog(&ctx, &cmd.rules)
        .into_iter()
        .map(Issue::Finding)
        .collect();

    Ok(finish(
        CommandSummary::Validate(ValidateSummary {
            catalog_path: display_path.clone(),
            entry_count: catalog.entries.len(),
            language: locale.map(|l| l.code.to_string()),
        }),
        issues,
        1,
        true,
    ))
}

/// An unregistered `Language` header only disables the locale-aware checks.
fn header_locale(code: &str) -> Option<&'static Locale> {
    let locale = locale::lookup(code).ok();
    if locale.is_none() {
        eprintln!(
            "{} unknown language '{}' in header; locale-specific checks are skipped",
            "warning:".bold().yellow(),
            code
        );
    }
    locale
}

/// `ar.po` / `pt_BR.po` name their locale.
fn locale_from_file_name(path: &Path) -> Option<&'static Locale> {
    let stem = path.file_stem()?.to_str()?;
    locale::lookup(stem).ok()
}
