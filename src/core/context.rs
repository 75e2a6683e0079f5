use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    config::{Config, load_config},
    core::{
        build::build_catalog,
        data::{Catalog, Header, NonLiteralCall, Occurrence},
        file_scanner::scan_files,
        po::strip_bom,
        scan::{FileScan, MarkupRules, Scan, Scanner},
    },
    issues::ScanErrorIssue,
    utils::relative_slash_path,
};

const MANIFEST_FILES: &[&str] = &["__manifest__.py", "__openerp__.py"];

/// Everything the scanners produced for one module.
#[derive(Debug, Default)]
pub struct ModuleScan {
    /// Occurrences from all files, in file order.
    pub occurrences: Vec<Occurrence>,
    pub non_literal: Vec<NonLiteralCall>,
    /// Files that could not be read or scanned.
    pub failures: Vec<ScanErrorIssue>,
    pub files_scanned: usize,
}

impl ModuleScan {
    /// Fold the occurrences into a fresh catalog.
    pub fn to_catalog(&self, header: Option<Header>) -> Catalog {
        build_catalog(self.occurrences.iter().cloned(), header)
    }
}

/// One module directory plus the configuration that applies to it.
///
/// Configuration priority (highest to lowest): CLI arguments, the nearest
/// `.potkitrc.json`, built-in defaults. CLI overrides are applied by the
/// commands after construction.
pub struct ModuleContext {
    pub config: Config,
    /// Config file in use; `None` when running on defaults.
    pub config_path: Option<PathBuf>,
    /// Canonical module directory.
    pub root_dir: PathBuf,
    /// Directory name of the module (`sale`, `stock_account`).
    pub module_name: String,
    /// Source files to scan, sorted.
    pub files: Vec<PathBuf>,
    /// Paths that could not be accessed while walking the module.
    pub skipped_count: usize,
}

impl ModuleContext {
    /// Resolve the module directory, load configuration and list files.
    ///
    /// Fails when the directory does not exist or cannot be read; that is
    /// the only scanning condition that aborts a run.
    pub fn new(module_dir: &Path, verbose: bool) -> Result<Self> {
        let root_dir = module_dir
            .canonicalize()
            .with_context(|| format!("Cannot read module directory: {}", module_dir.display()))?;
        if !root_dir.is_dir() {
            anyhow::bail!("Not a directory: {}", module_dir.display());
        }
        fs::read_dir(&root_dir)
            .with_context(|| format!("Cannot read module directory: {}", root_dir.display()))?;

        let loaded = load_config(&root_dir)?;
        if verbose {
            match &loaded.path {
                Some(path) => eprintln!("{} using config {}", "note:".bold().cyan(), path.display()),
                None => eprintln!(
                    "{} no config file found, using defaults",
                    "note:".bold().cyan()
                ),
            }
        }

        let module_name = root_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string());

        if verbose && !MANIFEST_FILES.iter().any(|m| root_dir.join(m).is_file()) {
            eprintln!(
                "{} {} has no manifest; scanning it as a plain directory",
                "note:".bold().cyan(),
                root_dir.display()
            );
        }

        let result = scan_files(
            &root_dir,
            &loaded.config.excluded_dirs,
            &loaded.config.ignores,
            verbose,
        );

        Ok(Self {
            config: loaded.config,
            config_path: loaded.path,
            root_dir,
            module_name,
            files: result.files,
            skipped_count: result.skipped_count,
        })
    }

    /// Directory catalogs are written to and read from.
    pub fn output_dir(&self) -> PathBuf {
        self.root_dir.join(&self.config.output_dir)
    }

    /// Path of the per-locale catalog (`i18n/<lang>.po`).
    pub fn locale_catalog_path(&self, lang: &str) -> PathBuf {
        self.output_dir().join(format!("{}.po", lang))
    }

    /// Path of the template catalog (`i18n/<module>.pot`).
    pub fn template_path(&self) -> PathBuf {
        self.output_dir().join(format!("{}.pot", self.module_name))
    }

    /// Scan every file in parallel.
    ///
    /// A file that cannot be read or scanned is recorded in `failures` and
    /// contributes nothing; the other files are unaffected.
    pub fn scan(&self) -> ModuleScan {
        let rules = Arc::new(MarkupRules::from_config(&self.config));

        let outcomes: Vec<Option<Result<FileScan, ScanErrorIssue>>> = self
            .files
            .par_iter()
            .map(|path| self.scan_file(path, &rules))
            .collect();

        let mut module_scan = ModuleScan::default();
        for outcome in outcomes.into_iter().flatten() {
            module_scan.files_scanned += 1;
            match outcome {
                Ok(file_scan) => {
                    module_scan.occurrences.extend(file_scan.occurrences);
                    module_scan.non_literal.extend(file_scan.non_literal);
                }
                Err(failure) => module_scan.failures.push(failure),
            }
        }
        module_scan
    }

    fn scan_file(
        &self,
        path: &Path,
        rules: &Arc<MarkupRules>,
    ) -> Option<Result<FileScan, ScanErrorIssue>> {
        let scanner = Scanner::for_path(path, rules)?;
        let relative = relative_slash_path(&self.root_dir, path);

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return Some(Err(ScanErrorIssue {
                    file_path: relative,
                    line: None,
                    error: format!("cannot read file: {}", e),
                }));
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let (text, _) = strip_bom(&text);

        Some(
            scanner
                .scan(text, &relative)
                .map_err(|e| ScanErrorIssue::from_scan_error(relative.clone(), &e)),
        )
    }
}
