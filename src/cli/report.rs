//! Terminal output for command results.
//!
//! Issues are printed cargo-style to stdout. Notices that must not mix with
//! machine-readable output (scan failures, threshold failures) go to stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CleanSummary, CommandResult, CommandSummary, ConvertSummary, ExtractSummary, InitSummary,
    MergeSummary, ReportSummary, ValidateSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Severity};
use crate::utils::plural;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue], verbose: bool) {
    report_to(issues, verbose, &mut io::stdout().lock());
}

/// Print issues to a custom writer. Scan failures are only listed when
/// `verbose` is set; otherwise they are summarized by
/// [`print_scan_warning`].
pub fn report_to<W: Write>(issues: &[Issue], verbose: bool, writer: &mut W) {
    let visible: Vec<&Issue> = issues
        .iter()
        .filter(|i| verbose || !matches!(i, Issue::ScanError(_)))
        .collect();
    if visible.is_empty() {
        return;
    }

    let max_line_width = visible
        .iter()
        .filter_map(|i| i.location().map(|loc| loc.line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1);

    for issue in &visible {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&visible, writer);
}

/// Print a warning about source files that could not be scanned.
pub fn print_scan_warning(count: usize, verbose: bool) {
    print_scan_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_scan_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be scanned (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if let Some(loc) = issue.location() {
        if loc.line > 0 {
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), loc.file_path, loc.line);
        } else {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path);
        }

        if let Some(source_line) = loc.source_line {
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                loc.line.to_string().blue(),
                "|".blue(),
                source_line,
                width = max_line_width
            );
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[&Issue], writer: &mut W) {
    let count = |severity: Severity| {
        issues
            .iter()
            .filter(|i| i.report_severity() == severity)
            .count()
    };
    let total_errors = count(Severity::Error);
    let total_warnings = count(Severity::Warning);
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            plural(total_problems, "problem", "problems"),
            total_errors,
            plural(total_errors, "error", "errors").red(),
            total_warnings,
            plural(total_warnings, "warning", "warnings").yellow()
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            report(&result.issues, verbose);
            print_extract(summary, result.files_checked);
        }
        CommandSummary::Report(summary) => {
            // stdout carries only the rendered report.
            if verbose {
                report_to(&result.issues, verbose, &mut io::stderr().lock());
            }
            print_report(summary);
        }
        CommandSummary::Validate(summary) => {
            report(&result.issues, verbose);
            if result.error_count + result.warning_count == 0 {
                print_validate(summary);
            }
        }
        CommandSummary::Merge(summary) => print_merge(summary),
        CommandSummary::Clean(summary) => print_clean(summary),
        CommandSummary::Stats(summary) => print!("{}", summary.rendered),
        CommandSummary::Convert(summary) => print_convert(summary),
        CommandSummary::Init(summary) => print_init(summary),
    }

    print_scan_warning(result.scan_failure_count, verbose);
}

fn print_extract(summary: &ExtractSummary, files_scanned: usize) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} {} from {} {} in {}",
            summary.entry_count,
            plural(summary.entry_count, "entry", "entries"),
            files_scanned,
            plural(files_scanned, "file", "files"),
            summary.module_name
        )
        .green()
    );
    if let Some(template_path) = &summary.template_path {
        println!("  {} {}", "wrote".bold(), template_path.display());
    }
    if summary.merged {
        println!(
            "  {} {} ({} added, {} obsolete)",
            "updated".bold(),
            summary.catalog_path.display(),
            summary.added_count,
            summary.obsolete_count
        );
    } else {
        println!("  {} {}", "created".bold(), summary.catalog_path.display());
    }
}

fn print_report(summary: &ReportSummary) {
    match &summary.output_path {
        Some(path) => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Report written to {}", path.display()).green()
        ),
        None => {
            print!("{}", summary.rendered);
            if !summary.rendered.ends_with('\n') {
                println!();
            }
        }
    }

    if let Some(min) = summary.min_percentage
        && !summary.threshold_met()
    {
        eprintln!(
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "Completion {:.2}% is below the required {}%",
                summary.completion_percent, min
            )
            .red()
        );
    }
}

fn print_validate(summary: &ValidateSummary) {
    let language = summary
        .language
        .as_deref()
        .map(|lang| format!(" ({})", lang))
        .unwrap_or_default();
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} {} in {}{} - no problems found",
            summary.entry_count,
            plural(summary.entry_count, "entry", "entries"),
            summary.catalog_path,
            language
        )
        .green()
    );
}

fn print_merge(summary: &MergeSummary) {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Merged {} {} into {} ({} added, {} obsolete)",
            summary.entry_count,
            plural(summary.entry_count, "entry", "entries"),
            summary.output_path.display(),
            summary.added_count,
            summary.obsolete_count
        )
        .green()
    );
}

fn print_clean(summary: &CleanSummary) {
    let msg = if summary.removed_count == 0 {
        format!("No obsolete entries in {}", summary.output_path.display())
    } else {
        format!(
            "Removed {} obsolete {} from {}",
            summary.removed_count,
            plural(summary.removed_count, "entry", "entries"),
            summary.output_path.display()
        )
    };
    println!("{} {}", SUCCESS_MARK.green(), msg.green());
}

fn print_convert(summary: &ConvertSummary) {
    if !summary.changed {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} is already normalized", summary.output_path.display()).green()
        );
        return;
    }

    let mut notes = Vec::new();
    if summary.source_encoding != "UTF-8" {
        notes.push(format!("re-encoded from {}", summary.source_encoding));
    }
    if summary.removed_bom {
        notes.push("removed BOM".to_string());
    }
    notes.push(format!("{} -> {} lines", summary.original_lines, summary.lines));
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Converted {} ({})",
            summary.output_path.display(),
            notes.join(", ")
        )
        .green()
    );
}

fn print_init(summary: &InitSummary) {
    match &summary.error {
        Some(error) => eprintln!("{} {}", FAILURE_MARK.red(), error.red()),
        None => println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        ),
    }
}
