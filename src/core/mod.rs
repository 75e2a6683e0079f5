//! Catalog engine.
//!
//! Data flows leaf-first through these modules:
//!
//! 1. `file_scanner` lists the module's source files
//! 2. `scan` turns each file into occurrences (in parallel, via `context`)
//! 3. `build` folds occurrences into a fresh catalog
//! 4. `merge` combines it with the catalog already on disk
//! 5. `po` reads and writes the textual catalog format
//!
//! `locale` is the read-only locale registry used by validation and
//! extraction headers.

pub mod build;
pub mod context;
pub mod data;
pub mod error;
pub mod file_scanner;
pub mod locale;
pub mod merge;
pub mod po;
pub mod scan;

pub use build::build_catalog;
pub use context::{ModuleContext, ModuleScan};
pub use error::{ParseError, ParseErrorKind, ScanError, UnknownLocale};
pub use locale::Locale;
pub use merge::merge;
