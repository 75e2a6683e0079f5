use std::fs;

use anyhow::{Context, Ok, Result};

use super::super::args::StatsCommand;
use super::{
    CommandResult, CommandSummary, StatsSummary,
    helper::{finish, load_catalog},
};
use crate::report::stats::{CatalogStats, format_stats};

pub fn stats(cmd: StatsCommand) -> Result<CommandResult> {
    let path = &cmd.catalog;
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?
        .len();
    let catalog = load_catalog(path)?;

    let stats = CatalogStats::new(path.display().to_string(), size_bytes, &catalog, cmd.top);

    Ok(finish(
        CommandSummary::Stats(StatsSummary {
            rendered: format_stats(&stats),
        }),
        Vec::new(),
        1,
        true,
    ))
}
