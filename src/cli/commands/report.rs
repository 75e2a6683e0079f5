use std::fs;

use anyhow::{Context, Ok, Result};

use super::super::args::ReportCommand;
use super::{
    CommandResult, CommandSummary, ReportSummary,
    helper::{finish, load_catalog, normalize_lang},
};
use crate::{
    core::{ModuleContext, locale, merge::merge},
    issues::Issue,
    report::{CatalogReport, render},
    utils::relative_slash_path,
};

pub fn report(cmd: ReportCommand) -> Result<CommandResult> {
    if let Some(min) = cmd.min_percentage
        && !(0.0..=100.0).contains(&min)
    {
        anyhow::bail!("--min-percentage must be between 0 and 100, got {}", min);
    }
    let lang = normalize_lang(&cmd.lang);
    locale::lookup(&lang)?;

    let mut ctx = ModuleContext::new(&cmd.module, cmd.common.verbose)?;
    if let Some(output_dir) = &cmd.output_dir {
        ctx.config.output_dir = output_dir.to_string_lossy().into_owned();
    }
    let scan = ctx.scan();
    let fresh = scan.to_catalog(None);

    let catalog_path = ctx.locale_catalog_path(&lang);
    let catalog_exists = catalog_path.exists();
    let catalog = if catalog_exists {
        merge(&load_catalog(&catalog_path)?, &fresh)
    } else {
        fresh
    };

    let report = CatalogReport::new(
        &ctx.module_name,
        &lang,
        relative_slash_path(&ctx.root_dir, &catalog_path),
        catalog_exists,
        &catalog,
    );
    let rendered = render(&report, cmd.format, cmd.missing_only);

    if let Some(output) = &cmd.output {
        fs::write(output, &rendered)
            .with_context(|| format!("Failed to write report: {}", output.display()))?;
    }

    let issues: Vec<Issue> = scan.failures.into_iter().map(Issue::ScanError).collect();

    Ok(finish(
        CommandSummary::Report(ReportSummary {
            rendered,
            output_path: cmd.output.clone(),
            completion_percent: report.stats.completion_percent,
            min_percentage: cmd.min_percentage.or(ctx.config.min_percentage),
        }),
        issues,
        scan.files_scanned,
        false,
    ))
}
