use anyhow::{Ok, Result};

use super::super::args::CleanCommand;
use super::{
    CleanSummary, CommandResult, CommandSummary,
    helper::{finish, load_catalog, write_catalog},
};

pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let mut catalog = load_catalog(&cmd.catalog)?;
    let removed_count = catalog.remove_obsolete();

    let output_path = cmd.output.clone().unwrap_or_else(|| cmd.catalog.clone());
    // An in-place clean with nothing to remove leaves the file untouched.
    if removed_count > 0 || cmd.output.is_some() {
        write_catalog(&output_path, &catalog)?;
    }

    Ok(finish(
        CommandSummary::Clean(CleanSummary {
            output_path,
            removed_count,
        }),
        Vec::new(),
        1,
        true,
    ))
}
