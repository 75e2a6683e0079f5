use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use super::data::{Catalog, CatalogEntry, Flag, Header, Occurrence, OccurrenceKind};

/// printf-style conversion in an imperative-language key.
static PYTHON_FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[sdifr(]").unwrap());

/// Fold occurrences into a catalog: one entry per distinct key, with the
/// union of its locations and an empty translation.
///
/// Attribute occurrences add an `attr:<name>` extractor comment; call
/// arguments containing printf-style conversions get `python-format`.
pub fn build_catalog(
    occurrences: impl IntoIterator<Item = Occurrence>,
    header: Option<Header>,
) -> Catalog {
    let mut by_key: HashMap<String, CatalogEntry> = HashMap::new();

    for occurrence in occurrences {
        let entry = by_key
            .entry(occurrence.text.clone())
            .or_insert_with(|| CatalogEntry::new(occurrence.text.clone()));
        entry.add_location(occurrence.location);

        match &occurrence.kind {
            OccurrenceKind::MarkupAttribute(name) => {
                let comment = format!("attr:{}", name);
                if !entry.comments.contains(&comment) {
                    entry.comments.push(comment);
                }
            }
            OccurrenceKind::ImperativeCall(_) if PYTHON_FORMAT_REGEX.is_match(&occurrence.text) => {
                entry.flags.insert(Flag::python_format());
            }
            _ => {}
        }
    }

    let mut catalog = Catalog {
        header,
        entries: by_key.into_values().collect(),
    };
    for entry in &mut catalog.entries {
        entry.comments.sort();
    }
    catalog.sort_entries();
    catalog
}
