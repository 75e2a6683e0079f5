/// Dispatch a parsed command to its handler.
///
/// # Returns
/// - `Ok(CommandResult)` with issue counts and exit behavior
/// - `Err` if the command could not run (unknown locale, unreadable
///   module, unparsable catalog, ...)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, clean::clean, convert::convert, extract::extract, init::init, merge::merge,
        report::report, stats::stats, validate::validate,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Report(cmd)) => report(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Merge(cmd)) => merge(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::Convert(cmd)) => convert(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
