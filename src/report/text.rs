use std::fmt::Write as _;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::CatalogReport;

pub(crate) const BAR_WIDTH: usize = 40;
const MAX_KEY_WIDTH: usize = 70;
const ELLIPSIS: &str = "...";

/// `[=====-----]` with `width` cells, filled in proportion to `percent`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((width as f64 * percent / 100.0).floor() as usize).min(width);
    format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
}

/// Escape newlines and cut `key` to at most `max_width` display columns.
pub fn display_key(key: &str, max_width: usize) -> String {
    let escaped = key.replace('\n', "\\n");
    if UnicodeWidthStr::width(escaped.as_str()) <= max_width {
        return escaped;
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut width = 0;
    let mut truncated = String::new();
    for c in escaped.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        truncated.push(c);
    }
    truncated.push_str(ELLIPSIS);
    truncated
}

pub fn format_text(report: &CatalogReport, missing_only: bool) -> String {
    let stats = &report.stats;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Translation report: {} ({})",
        report.module_name, report.language
    );
    let _ = writeln!(out, "Catalog:     {}", report.catalog_path);
    if !report.catalog_exists {
        let _ = writeln!(out, "             (not found; every entry counts as missing)");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Total:       {}", stats.total_active);
    let _ = writeln!(out, "Translated:  {}", stats.translated);
    let _ = writeln!(out, "Fuzzy:       {}", stats.fuzzy);
    let _ = writeln!(out, "Empty:       {}", stats.empty);
    let _ = writeln!(out, "Obsolete:    {}", stats.obsolete);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Progress:    {} {:.1}%",
        progress_bar(stats.completion_percent, BAR_WIDTH),
        stats.completion_percent
    );

    if report.missing.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No missing translations.");
        return out;
    }

    if !missing_only {
        let _ = writeln!(out);
        let _ = writeln!(out, "Missing by kind:");
        for (kind, count) in report.missing_by_kind() {
            let _ = writeln!(out, "  {:<18}{}", kind.to_string(), count);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Missing entries ({}):", report.missing.len());
    for (file, entries) in report.missing_by_file() {
        let _ = writeln!(out, "  {}", file.unwrap_or("(no location)"));
        for entry in entries {
            let _ = writeln!(
                out,
                "    [{:>4}] \"{}\"{}",
                entry.line,
                display_key(&entry.key, MAX_KEY_WIDTH),
                if entry.fuzzy { " (fuzzy)" } else { "" }
            );
        }
    }

    out
}
