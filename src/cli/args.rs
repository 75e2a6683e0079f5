//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: scan a module and write its template and locale catalogs
//! - `report`: completion statistics for one locale
//! - `validate`: run validation rules over a catalog file
//! - `merge`: merge two catalog files
//! - `clean`: drop obsolete entries from a catalog
//! - `stats`: statistics for one catalog file
//! - `convert`: re-encode a catalog as UTF-8 and normalize its layout
//! - `init`: write a default `.potkitrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::{report::ReportFormat, rules::ValidationRule};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Report(cmd)) => cmd.common.verbose,
            Some(Command::Validate(cmd)) => cmd.common.verbose,
            Some(Command::Merge(cmd)) => cmd.common.verbose,
            Some(Command::Clean(cmd)) => cmd.common.verbose,
            Some(Command::Stats(cmd)) => cmd.common.verbose,
            Some(Command::Convert(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Module directory to scan
    #[arg(default_value = ".")]
    pub module: PathBuf,

    /// Target locale code (e.g. ar, fr, pt_BR)
    #[arg(short, long)]
    pub lang: String,

    /// Catalog directory relative to the module (overrides config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not write the <module>.pot template
    #[arg(long)]
    pub no_pot: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Module directory to scan
    #[arg(default_value = ".")]
    pub module: PathBuf,

    /// Locale code of the catalog to report on
    #[arg(short, long)]
    pub lang: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Fail when completion is below this percentage (overrides config file)
    #[arg(long)]
    pub min_percentage: Option<f64>,

    /// Only list missing entries, without the per-kind breakdown
    #[arg(long)]
    pub missing_only: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Catalog directory relative to the module (overrides config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Catalog file (.po) to validate
    pub catalog: PathBuf,

    /// Locale to validate against (default: header Language, then file name)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Treat untranslated entries as errors
    #[arg(long)]
    pub strict: bool,

    /// Rules to run (default: all)
    /// Can be specified multiple times: --rule placeholders --rule fuzzy
    #[arg(long = "rule", value_enum)]
    pub rules: Vec<ValidationRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    /// Catalog holding existing translations
    #[arg(long)]
    pub base: PathBuf,

    /// Freshly extracted catalog (.po or .pot)
    #[arg(long)]
    pub new: PathBuf,

    /// Where to write the merged catalog
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    /// Catalog file (.po) to clean
    pub catalog: PathBuf,

    /// Write the result here instead of rewriting the catalog in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Catalog file (.po) to describe
    pub catalog: PathBuf,

    /// Number of source files to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Catalog file (.po) to convert
    pub catalog: PathBuf,

    /// Write the result here instead of rewriting the catalog in place
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source encoding (e.g. latin1, cp1256, iso-8859-6); detected when omitted
    #[arg(long = "from")]
    pub encoding: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings and write/update catalogs
    Extract(ExtractCommand),
    /// Report translation completeness for a locale
    Report(ReportCommand),
    /// Validate a catalog file (header, encoding, placeholders, plural forms, ...)
    Validate(ValidateCommand),
    /// Merge a new catalog into one with existing translations
    Merge(MergeCommand),
    /// Remove obsolete entries from a catalog
    Clean(CleanCommand),
    /// Show statistics for a catalog file
    Stats(StatsCommand),
    /// Re-encode a catalog as UTF-8 and normalize line endings and blank lines
    Convert(ConvertCommand),
    /// Initialize a new .potkitrc.json configuration file
    Init,
}
