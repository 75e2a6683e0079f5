//! Core data types shared by every stage of the pipeline.
//!
//! ## Module Structure
//!
//! - `location`: SourceLocation (file path + line)
//! - `occurrence`: Occurrence, OccurrenceKind, NonLiteralCall (scanner output)
//! - `flag`: Flag (fuzzy, obsolete, format kinds)
//! - `header`: Header and PluralForms (catalog metadata)
//! - `catalog`: Catalog and CatalogEntry

pub mod catalog;
pub mod flag;
pub mod header;
pub mod location;
pub mod occurrence;

pub use catalog::{Catalog, CatalogEntry, compare_entries};
pub use flag::Flag;
pub use header::{Header, PluralForms};
pub use location::SourceLocation;
pub use occurrence::{
    CallShape, NonLiteralCall, NonLiteralReason, Occurrence, OccurrenceKind, SourceKind,
};
