use anyhow::{Ok, Result};

use super::super::args::MergeCommand;
use super::{
    CommandResult, CommandSummary, MergeSummary,
    helper::{count_added, finish, load_catalog, write_catalog},
};
use crate::core::merge::merge as merge_catalogs;

pub fn merge(cmd: MergeCommand) -> Result<CommandResult> {
    let base = load_catalog(&cmd.base)?;
    let new = load_catalog(&cmd.new)?;

    let merged = merge_catalogs(&base, &new);
    write_catalog(&cmd.output, &merged)?;

    let obsolete_count = merged.entries.iter().filter(|e| e.is_obsolete()).count();
    Ok(finish(
        CommandSummary::Merge(MergeSummary {
            output_path: cmd.output.clone(),
            entry_count: merged.entries.len() - obsolete_count,
            added_count: count_added(&base, &merged),
            obsolete_count,
        }),
        Vec::new(),
        2,
        true,
    ))
}
