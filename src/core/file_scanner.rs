use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::utils::relative_slash_path;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal path prefixes.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of walking a module directory.
pub struct ScanResult {
    /// Scannable files, sorted.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed while walking.
    pub skipped_count: usize,
}

/// Collect the `.py`, `.xml` and `.js` files of a module.
///
/// `excluded_dirs` entries match a directory by name (`tests`) or by
/// trailing relative path (`static/lib`). `ignore_patterns` are matched
/// against the module-relative path.
pub fn scan_files(
    root: &Path,
    excluded_dirs: &[String],
    ignore_patterns: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignores: Vec<&str> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();
    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignores.push(p.trim_end_matches('/'));
        }
    }

    let walker = WalkDir::new(root).sort_by_file_name().into_iter().filter_entry(|entry| {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || !is_excluded_dir(&relative_slash_path(root, entry.path()), excluded_dirs)
    });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_scannable_file(path) {
            continue;
        }

        let relative = relative_slash_path(root, path);
        if literal_ignores
            .iter()
            .any(|prefix| relative == *prefix || relative.starts_with(&format!("{}/", prefix)))
        {
            continue;
        }
        if glob_patterns.iter().any(|p| p.matches(&relative)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn is_excluded_dir(relative: &str, excluded_dirs: &[String]) -> bool {
    excluded_dirs.iter().any(|excluded| {
        let excluded = excluded.trim_matches('/');
        relative == excluded || relative.ends_with(&format!("/{}", excluded))
    })
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("py" | "xml" | "js")
    )
}
