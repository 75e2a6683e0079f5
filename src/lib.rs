//! potkit - translation catalog toolkit for Odoo-style modules
//!
//! potkit extracts translatable strings from a module's Python, JavaScript
//! and XML sources into gettext catalogs, merges them with existing
//! translations, reports completion per locale and validates catalogs for
//! problems that break at runtime (placeholders, plural forms, encoding,
//! bidirectional text).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: `.potkitrc.json` loading
//! - `core`: Extraction, catalog model, merge and the PO format
//! - `issues`: Issue types and their reporting trait
//! - `report`: Completion statistics and report formats
//! - `rules`: Catalog validation rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod report;
pub mod rules;
pub mod utils;
