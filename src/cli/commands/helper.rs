use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    core::{
        data::Catalog,
        po::{encoding::decode, parse, serialize},
    },
    issues::{Issue, Severity},
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let scan_failure_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ScanError(_)))
        .count();
    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        scan_failure_count,
        files_checked,
    }
}

/// Read and parse a catalog file. Legacy encodings are decoded as `convert`
/// would; a structural error aborts the command.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read catalog: {}", path.display()))?;
    let decoded = decode(&bytes, None)
        .with_context(|| format!("Failed to decode catalog: {}", path.display()))?;
    parse(&decoded.text).with_context(|| format!("Failed to parse catalog: {}", path.display()))
}

/// Serialize a catalog to `path`, creating parent directories.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, serialize(catalog))
        .with_context(|| format!("Failed to write catalog: {}", path.display()))
}

/// Locale code as written in file names and headers (`pt-BR` -> `pt_BR`).
pub fn normalize_lang(code: &str) -> String {
    code.trim().replace('-', "_")
}

/// Keys of `catalog` that are active and absent from `previous`.
pub fn count_added(previous: &Catalog, catalog: &Catalog) -> usize {
    catalog
        .active_entries()
        .filter(|e| previous.get(&e.key).is_none())
        .count()
}
