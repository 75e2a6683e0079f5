//! Statistics for a single catalog file, independent of any module scan.

use std::{collections::HashMap, fmt::Write as _};

use super::{
    CatalogReport, CompletionStats,
    text::{BAR_WIDTH, progress_bar},
};
use crate::core::data::Catalog;

/// References to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCount {
    pub file_path: String,
    /// Active entries referencing this file.
    pub strings: usize,
    /// Missing entries whose first reference is this file.
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyLength {
    pub average: f64,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub catalog_path: String,
    pub language: Option<String>,
    pub size_bytes: u64,
    pub completion: CompletionStats,
    /// Over translated entries, in characters; `None` when nothing is translated.
    pub key_length: Option<KeyLength>,
    /// Most referenced files first, at most `top` of them.
    pub top_files: Vec<FileCount>,
}

impl CatalogStats {
    pub fn new(
        catalog_path: impl Into<String>,
        size_bytes: u64,
        catalog: &Catalog,
        top: usize,
    ) -> Self {
        let catalog_path = catalog_path.into();
        let language = catalog.language().map(str::to_string);
        let report = CatalogReport::new(
            "",
            language.clone().unwrap_or_default(),
            catalog_path.clone(),
            true,
            catalog,
        );

        let mut strings: HashMap<&str, usize> = HashMap::new();
        for entry in catalog.active_entries() {
            let mut files: Vec<&str> = entry
                .locations
                .iter()
                .map(|l| l.file_path.as_str())
                .collect();
            files.sort_unstable();
            files.dedup();
            for file in files {
                *strings.entry(file).or_default() += 1;
            }
        }
        let missing: HashMap<&str, usize> = report
            .missing_by_file()
            .into_iter()
            .filter_map(|(file, entries)| file.map(|f| (f, entries.len())))
            .collect();

        let mut top_files: Vec<FileCount> = strings
            .into_iter()
            .map(|(file, count)| FileCount {
                file_path: file.to_string(),
                strings: count,
                missing: missing.get(file).copied().unwrap_or(0),
            })
            .collect();
        top_files.sort_by(|a, b| {
            b.strings
                .cmp(&a.strings)
                .then_with(|| a.file_path.cmp(&b.file_path))
        });
        top_files.truncate(top);

        let lengths: Vec<usize> = catalog
            .active_entries()
            .filter(|e| !e.is_missing())
            .map(|e| e.key.chars().count())
            .collect();
        let key_length = lengths.iter().max().map(|&max| KeyLength {
            average: lengths.iter().sum::<usize>() as f64 / lengths.len() as f64,
            max,
        });

        Self {
            catalog_path,
            language,
            size_bytes,
            completion: report.stats,
            key_length,
            top_files,
        }
    }
}

pub fn format_stats(stats: &CatalogStats) -> String {
    let completion = &stats.completion;
    let mut out = String::new();

    let _ = writeln!(out, "Statistics for: {}", stats.catalog_path);
    let _ = writeln!(
        out,
        "Language:    {}",
        stats.language.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(
        out,
        "File size:   {:.1} KB ({} bytes)",
        stats.size_bytes as f64 / 1024.0,
        stats.size_bytes
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Total:       {}", completion.total_active);
    let _ = writeln!(out, "Translated:  {}", completion.translated);
    let _ = writeln!(out, "Fuzzy:       {}", completion.fuzzy);
    let _ = writeln!(out, "Empty:       {}", completion.empty);
    let _ = writeln!(out, "Obsolete:    {}", completion.obsolete);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Progress:    {} {:.1}%",
        progress_bar(completion.completion_percent, BAR_WIDTH),
        completion.completion_percent
    );

    if let Some(length) = &stats.key_length {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Key length:  {:.0} chars average, {} max",
            length.average, length.max
        );
    }

    if !stats.top_files.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Top source files:");
        for file in &stats.top_files {
            let missing = if file.missing > 0 {
                format!("  ({} missing)", file.missing)
            } else {
                String::new()
            };
            let _ = writeln!(out, "  {:>5}  {}{}", file.strings, file.file_path, missing);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::report::test_support::sample_catalog;

    #[test]
    fn test_format_stats() {
        let stats = CatalogStats::new("i18n/ar.po", 2048, &sample_catalog(), 10);
        assert_eq!(
            format_stats(&stats),
            "\
Statistics for: i18n/ar.po
Language:    unknown
File size:   2.0 KB (2048 bytes)

Total:       10
Translated:  6
Fuzzy:       2
Empty:       2
Obsolete:    1

Progress:    [========================----------------] 60.0%

Key length:  6 chars average, 6 max

Top source files:
      6  models/sale.py
      2  static/src/js/a.js  (2 missing)
      2  views/sale.xml  (2 missing)
"
        );
    }

    #[test]
    fn test_top_limits_file_list() {
        let stats = CatalogStats::new("i18n/ar.po", 0, &sample_catalog(), 1);
        assert_eq!(
            stats.top_files,
            vec![FileCount {
                file_path: "models/sale.py".to_string(),
                strings: 6,
                missing: 0,
            }]
        );
    }

    #[test]
    fn test_empty_catalog() {
        let stats = CatalogStats::new("empty.po", 0, &Catalog::default(), 10);
        assert_eq!(stats.key_length, None);
        let text = format_stats(&stats);
        assert!(text.contains("Progress:    [----------------------------------------] 0.0%"));
        assert!(!text.contains("Top source files"));
    }
}
