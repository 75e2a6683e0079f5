use std::collections::{HashMap, HashSet};

use super::data::{Catalog, CatalogEntry, Flag};

/// Combine a catalog built from the current source with the catalog that
/// holds earlier translation work.
///
/// - key in both: translation, flags and translator comments come from
///   `existing`; locations, extractor comments and format flags from `new`. A key that
///   was obsolete and reappears becomes active again.
/// - key only in `new`: added untranslated.
/// - key only in `existing`: kept with the `obsolete` flag.
///
/// `fuzzy` is never set or cleared here. The header of `existing` wins when
/// it has one.
pub fn merge(existing: &Catalog, new: &Catalog) -> Catalog {
    let mut previous: HashMap<&str, &CatalogEntry> = HashMap::new();
    for entry in &existing.entries {
        previous.entry(entry.key.as_str()).or_insert(entry);
    }

    let mut entries = Vec::with_capacity(new.entries.len() + existing.entries.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for fresh in &new.entries {
        if !seen.insert(fresh.key.as_str()) {
            continue;
        }
        let mut merged = fresh.clone();
        merged.line = None;
        merged.flags.remove(&Flag::Obsolete);
        if let Some(old) = previous.get(fresh.key.as_str()) {
            merged.translation = old.translation.clone();
            merged.translator_comments = old.translator_comments.clone();
            // Only format flags follow the new source; the rest is translator state.
            merged.flags = old
                .flags
                .iter()
                .filter(|f| **f != Flag::Obsolete)
                .chain(fresh.flags.iter().filter(|f| matches!(f, Flag::Format(_))))
                .cloned()
                .collect();
        } else {
            merged.translation.clear();
            merged.flags.remove(&Flag::Fuzzy);
        }
        entries.push(merged);
    }

    for old in &existing.entries {
        if !seen.insert(old.key.as_str()) {
            continue;
        }
        let mut retired = old.clone();
        retired.line = None;
        retired.flags.insert(Flag::Obsolete);
        entries.push(retired);
    }

    let mut catalog = Catalog {
        header: existing.header.clone().or_else(|| new.header.clone()),
        entries,
    };
    catalog.sort_entries();
    catalog
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data::{Header, SourceLocation};

    fn entry(key: &str, translation: &str, file: &str, line: usize) -> CatalogEntry {
        let mut e = CatalogEntry::new(key);
        e.translation = translation.to_string();
        e.add_location(SourceLocation::new(file, line));
        e
    }

    fn catalog(entries: Vec<CatalogEntry>) -> Catalog {
        Catalog {
            header: None,
            entries,
        }
    }

    #[test]
    fn test_merge_preserves_translation_and_flags() {
        let mut old = entry("Hello", "Bonjour", "models/a.py", 3);
        old.flags.insert(Flag::Fuzzy);
        old.translator_comments.push("informal".to_string());
        let existing = catalog(vec![old]);
        let new = catalog(vec![entry("Hello", "", "models/a.py", 40)]);

        let merged = merge(&existing, &new);
        let hello = merged.get("Hello").unwrap();
        assert_eq!(hello.translation, "Bonjour");
        assert!(hello.is_fuzzy());
        assert!(!hello.is_obsolete());
        assert_eq!(hello.locations, vec![SourceLocation::new("models/a.py", 40)]);
        assert_eq!(hello.translator_comments, vec!["informal".to_string()]);
    }

    #[test]
    fn test_merge_does_not_copy_fuzzy_from_new() {
        let existing = catalog(vec![entry("Hello", "Bonjour", "models/a.py", 3)]);
        let mut fresh = entry("Hello", "", "models/a.py", 3);
        fresh.flags.insert(Flag::Fuzzy);
        fresh.flags.insert(Flag::Other("no-wrap".to_string()));
        let new = catalog(vec![fresh]);

        let merged = merge(&existing, &new);
        let hello = merged.get("Hello").unwrap();
        assert_eq!(hello.translation, "Bonjour");
        assert!(!hello.is_fuzzy());
        assert!(hello.flags.is_empty());
    }

    #[test]
    fn test_merge_marks_removed_keys_obsolete() {
        let existing = catalog(vec![entry("Gone", "Parti", "models/a.py", 3)]);
        let new = catalog(vec![entry("Fresh", "", "models/a.py", 5)]);

        let merged = merge(&existing, &new);
        assert_eq!(merged.entries.len(), 2);
        let gone = merged.get("Gone").unwrap();
        assert!(gone.is_obsolete());
        assert_eq!(gone.translation, "Parti");
        let fresh = merged.get("Fresh").unwrap();
        assert!(fresh.translation.is_empty());
        assert!(fresh.flags.is_empty());
    }

    #[test]
    fn test_reappearing_key_is_revived() {
        let mut old = entry("Back", "Retour", "models/a.py", 1);
        old.flags.insert(Flag::Obsolete);
        let merged = merge(&catalog(vec![old]), &catalog(vec![entry("Back", "", "b.py", 2)]));
        let back = merged.get("Back").unwrap();
        assert!(!back.is_obsolete());
        assert_eq!(back.translation, "Retour");
    }

    #[test]
    fn test_format_flag_follows_new_source() {
        let existing = catalog(vec![entry("Total %s", "Total %s", "a.py", 1)]);
        let mut fresh = entry("Total %s", "", "a.py", 1);
        fresh.flags.insert(Flag::python_format());
        let merged = merge(&existing, &catalog(vec![fresh]));
        assert!(merged.entries[0].flags.contains(&Flag::python_format()));
    }

    #[test]
    fn test_existing_header_wins() {
        let mut existing = catalog(vec![]);
        existing.header = Some(Header::new("sale", Some("fr"), None));
        let mut new = catalog(vec![]);
        new.header = Some(Header::new("sale", Some("de"), None));
        assert_eq!(merge(&existing, &new).language(), Some("fr"));
        assert_eq!(merge(&catalog(vec![]), &new).language(), Some("de"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = catalog(vec![
            entry("A", "a", "x.py", 1),
            entry("Old", "o", "x.py", 9),
        ]);
        let new = catalog(vec![entry("A", "", "x.py", 2), entry("B", "", "x.py", 3)]);
        let once = merge(&existing, &new);
        let twice = merge(&once, &new);
        assert_eq!(once, twice);
    }
}
