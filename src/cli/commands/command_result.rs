use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Report(ReportSummary),
    Validate(ValidateSummary),
    Merge(MergeSummary),
    Clean(CleanSummary),
    Stats(StatsSummary),
    Convert(ConvertSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub module_name: String,
    pub entry_count: usize,
    /// `None` with `--no-pot`.
    pub template_path: Option<PathBuf>,
    pub catalog_path: PathBuf,
    /// The locale catalog existed and was merged rather than created.
    pub merged: bool,
    /// Keys not present in the previous locale catalog.
    pub added_count: usize,
    pub obsolete_count: usize,
}

#[derive(Debug)]
pub struct ReportSummary {
    pub rendered: String,
    /// Set when the report was written to a file.
    pub output_path: Option<PathBuf>,
    pub completion_percent: f64,
    pub min_percentage: Option<f64>,
}

impl ReportSummary {
    pub fn threshold_met(&self) -> bool {
        self.min_percentage
            .is_none_or(|min| self.completion_percent >= min)
    }
}

#[derive(Debug)]
pub struct ValidateSummary {
    pub catalog_path: String,
    pub entry_count: usize,
    pub language: Option<String>,
}

#[derive(Debug)]
pub struct MergeSummary {
    pub output_path: PathBuf,
    pub entry_count: usize,
    pub added_count: usize,
    pub obsolete_count: usize,
}

#[derive(Debug)]
pub struct CleanSummary {
    pub output_path: PathBuf,
    pub removed_count: usize,
}

#[derive(Debug)]
pub struct StatsSummary {
    pub rendered: String,
}

#[derive(Debug)]
pub struct ConvertSummary {
    pub output_path: PathBuf,
    /// Name of the encoding the input was read as.
    pub source_encoding: &'static str,
    pub removed_bom: bool,
    pub original_lines: usize,
    pub lines: usize,
    /// The output differs from the input bytes.
    pub changed: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub error: Option<String>,
}

/// Result of running a potkit command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 is returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found by the command, sorted.
    pub issues: Vec<Issue>,
    /// Number of source files that could not be scanned.
    pub scan_failure_count: usize,
    /// Number of source or catalog files the command looked at.
    pub files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        let failed = match &self.summary {
            CommandSummary::Report(summary) => !summary.threshold_met(),
            CommandSummary::Init(summary) => summary.error.is_some(),
            _ => false,
        };
        if failed || (self.exit_on_errors && self.error_count > 0) {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
