use anyhow::{Ok, Result};

use super::super::args::ExtractCommand;
use super::{
    CommandResult, CommandSummary, ExtractSummary,
    helper::{count_added, finish, load_catalog, normalize_lang, write_catalog},
};
use crate::{
    core::{ModuleContext, data::Header, locale, merge::merge},
    issues::{Issue, NonLiteralCallIssue},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let lang = normalize_lang(&cmd.lang);
    let locale = locale::lookup(&lang)?;

    let mut ctx = ModuleContext::new(&cmd.module, cmd.common.verbose)?;
    if let Some(output_dir) = &cmd.output_dir {
        ctx.config.output_dir = output_dir.to_string_lossy().into_owned();
    }
    let scan = ctx.scan();

    let template_path = if cmd.no_pot {
        None
    } else {
        let template = scan.to_catalog(Some(Header::new(&ctx.module_name, None, None)));
        let path = ctx.template_path();
        write_catalog(&path, &template)?;
        Some(path)
    };

    let plural_forms = locale.plural_forms();
    let fresh = scan.to_catalog(Some(Header::new(
        &ctx.module_name,
        Some(lang.as_str()),
        Some(plural_forms.as_str()),
    )));

    let catalog_path = ctx.locale_catalog_path(&lang);
    let merged = catalog_path.exists();
    let (catalog, added_count) = if merged {
        let existing = load_catalog(&catalog_path)?;
        let catalog = merge(&existing, &fresh);
        let added = count_added(&existing, &catalog);
        (catalog, added)
    } else {
        let added = fresh.entries.len();
        (fresh, added)
    };
    write_catalog(&catalog_path, &catalog)?;

    let obsolete_count = catalog.entries.iter().filter(|e| e.is_obsolete()).count();
    let entry_count = catalog.entries.len() - obsolete_count;

    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(
        scan.non_literal
            .into_iter()
            .map(|call| Issue::NonLiteralCall(NonLiteralCallIssue { call })),
    );
    issues.extend(scan.failures.into_iter().map(Issue::ScanError));

    Ok(finish(
        CommandSummary::Extract(ExtractSummary {
            module_name: ctx.module_name.clone(),
            entry_count,
            template_path,
            catalog_path,
            merged,
            added_count,
            obsolete_count,
        }),
        issues,
        scan.files_scanned,
        true,
    ))
}
