//! Completion statistics and report rendering.
//!
//! The reporter only computes numbers and renders them. Deciding whether a
//! completion percentage is good enough is the caller's job.
//!
//! ## Module Structure
//!
//! - `text`: human-readable report with progress bar
//! - `json`: machine-readable report
//! - `csv`: missing entries only, for spreadsheet editing
//! - `stats`: per-file statistics for `potkit stats`

pub mod csv;
pub mod json;
pub mod stats;
pub mod text;

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::Serialize;

use crate::core::data::{Catalog, CatalogEntry, SourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Counts over a catalog.
///
/// `completion_percent = translated / total_active * 100`, where obsolete
/// entries are excluded from `total_active` and `translated` counts
/// non-empty, non-fuzzy, non-obsolete entries. An empty catalog is 0%.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total_active: usize,
    pub translated: usize,
    /// Active entries flagged fuzzy.
    pub fuzzy: usize,
    /// Active, non-fuzzy entries with an empty translation.
    pub empty: usize,
    pub obsolete: usize,
    pub completion_percent: f64,
}

impl CompletionStats {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut stats = Self {
            total_active: 0,
            translated: 0,
            fuzzy: 0,
            empty: 0,
            obsolete: 0,
            completion_percent: 0.0,
        };

        for entry in &catalog.entries {
            if entry.is_obsolete() {
                stats.obsolete += 1;
                continue;
            }
            stats.total_active += 1;
            if entry.is_fuzzy() {
                stats.fuzzy += 1;
            } else if entry.translation.is_empty() {
                stats.empty += 1;
            } else {
                stats.translated += 1;
            }
        }

        if stats.total_active > 0 {
            stats.completion_percent =
                (stats.translated as f64 * 100.0) / stats.total_active as f64;
        }
        stats
    }

    /// Entries not usable by end users yet (empty or fuzzy).
    pub fn missing(&self) -> usize {
        self.fuzzy + self.empty
    }
}

/// One entry that still needs translation work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingEntry {
    pub key: String,
    pub kind: SourceKind,
    /// First source location; `None` for entries without one.
    pub file_path: Option<String>,
    pub line: usize,
    pub fuzzy: bool,
}

impl MissingEntry {
    fn from_entry(entry: &CatalogEntry) -> Self {
        let location = entry.first_location();
        Self {
            key: entry.key.clone(),
            kind: entry.source_kind(),
            file_path: location.map(|l| l.file_path.clone()),
            line: location.map_or(0, |l| l.line),
            fuzzy: entry.is_fuzzy(),
        }
    }
}

/// Completion report for one module and language.
#[derive(Debug, Clone)]
pub struct CatalogReport {
    pub module_name: String,
    pub language: String,
    /// Catalog the translations were read from.
    pub catalog_path: String,
    /// Whether that catalog existed; when it did not, everything is missing.
    pub catalog_exists: bool,
    pub stats: CompletionStats,
    /// Sorted by file, then line; entries without a location last.
    pub missing: Vec<MissingEntry>,
}

impl CatalogReport {
    pub fn new(
        module_name: impl Into<String>,
        language: impl Into<String>,
        catalog_path: impl Into<String>,
        catalog_exists: bool,
        catalog: &Catalog,
    ) -> Self {
        let mut missing: Vec<MissingEntry> = catalog
            .entries
            .iter()
            .filter(|e| e.is_missing())
            .map(MissingEntry::from_entry)
            .collect();
        missing.sort_by(|a, b| match (&a.file_path, &b.file_path) {
            (Some(fa), Some(fb)) => fa
                .cmp(fb)
                .then(a.line.cmp(&b.line))
                .then_with(|| a.key.cmp(&b.key)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.key.cmp(&b.key),
        });

        Self {
            module_name: module_name.into(),
            language: language.into(),
            catalog_path: catalog_path.into(),
            catalog_exists,
            stats: CompletionStats::from_catalog(catalog),
            missing,
        }
    }

    /// Missing-entry counts per source kind, in report order; kinds with no
    /// missing entries are left out.
    pub fn missing_by_kind(&self) -> Vec<(SourceKind, usize)> {
        let mut counts: BTreeMap<SourceKind, usize> = BTreeMap::new();
        for entry in &self.missing {
            *counts.entry(entry.kind).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Missing entries grouped by file, in file order. Entries without a
    /// location are grouped under `None`, last.
    pub fn missing_by_file(&self) -> Vec<(Option<&str>, Vec<&MissingEntry>)> {
        let mut groups: Vec<(Option<&str>, Vec<&MissingEntry>)> = Vec::new();
        for entry in &self.missing {
            let file = entry.file_path.as_deref();
            match groups.last_mut() {
                Some((current, entries)) if *current == file => entries.push(entry),
                _ => groups.push((file, vec![entry])),
            }
        }
        groups
    }
}

/// Render `report` in `format`. `missing_only` drops the per-kind breakdown
/// of the text format.
pub fn render(report: &CatalogReport, format: ReportFormat, missing_only: bool) -> String {
    match format {
        ReportFormat::Text => text::format_text(report, missing_only),
        ReportFormat::Json => json::format_json(report),
        ReportFormat::Csv => csv::format_csv(report),
    }
}
