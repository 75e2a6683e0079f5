//! Reading and writing the textual catalog format (`.po` / `.pot`).
//!
//! `parse` and `serialize` are inverse for every catalog built from valid
//! field values whose entries are in [`compare_entries`] order.
//!
//! [`compare_entries`]: crate::core::data::compare_entries

pub mod encoding;
mod parser;
mod serializer;

pub use parser::parse;
pub use serializer::serialize;

const BOM: char = '\u{feff}';

/// Split off a leading byte-order mark, reporting whether one was present.
pub fn strip_bom(text: &str) -> (&str, bool) {
    match text.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}
