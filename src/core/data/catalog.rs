use std::{cmp::Ordering, collections::BTreeSet, path::Path};

use super::{Flag, Header, SourceKind, SourceLocation};

/// One translatable unit of a catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntry {
    /// The source string exactly as extracted (msgid). Identity within a catalog.
    pub key: String,
    /// Target-language string (msgstr). Empty means untranslated.
    pub translation: String,
    /// Sorted, de-duplicated source positions.
    pub locations: Vec<SourceLocation>,
    /// Extractor comments (`#.`).
    pub comments: Vec<String>,
    /// Translator comments (`# `).
    pub translator_comments: Vec<String>,
    pub flags: BTreeSet<Flag>,
    /// Line of the entry's `msgid` in the file it was read from.
    /// Not part of the entry's identity.
    pub line: Option<usize>,
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.translation == other.translation
            && self.locations == other.locations
            && self.comments == other.comments
            && self.translator_comments == other.translator_comments
            && self.flags == other.flags
    }
}

impl Eq for CatalogEntry {}

impl CatalogEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.contains(&Flag::Fuzzy)
    }

    pub fn is_obsolete(&self) -> bool {
        self.flags.contains(&Flag::Obsolete)
    }

    /// Usable by end users: non-empty, not fuzzy, not obsolete.
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty() && !self.is_fuzzy() && !self.is_obsolete()
    }

    /// Active but not usable yet: empty translation or fuzzy.
    pub fn is_missing(&self) -> bool {
        !self.is_obsolete() && (self.translation.is_empty() || self.is_fuzzy())
    }

    /// Format kinds this entry is flagged with (`python` for `python-format`).
    pub fn format_kinds(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().filter_map(|f| match f {
            Flag::Format(kind) => Some(kind.as_str()),
            _ => None,
        })
    }

    /// Insert a location keeping the list sorted and free of duplicates.
    pub fn add_location(&mut self, location: SourceLocation) {
        if let Err(pos) = self.locations.binary_search(&location) {
            self.locations.insert(pos, location);
        }
    }

    pub fn first_location(&self) -> Option<&SourceLocation> {
        self.locations.first()
    }

    /// Reporting group of this entry.
    ///
    /// Attribute occurrences carry an `attr:<name>` extractor comment; the
    /// other groups follow the extension of the first location.
    pub fn source_kind(&self) -> SourceKind {
        if self.comments.iter().any(|c| c.starts_with("attr:")) {
            return SourceKind::MarkupAttribute;
        }
        let extension = self
            .first_location()
            .and_then(|loc| Path::new(&loc.file_path).extension())
            .and_then(|ext| ext.to_str());
        match extension {
            Some("py") => SourceKind::ImperativeCall,
            Some("js") => SourceKind::ScriptCall,
            Some("xml") => SourceKind::MarkupText,
            _ => SourceKind::Other,
        }
    }
}

/// Serialization order: first location's file, then line; entries without
/// a location last; key breaks ties.
pub fn compare_entries(a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
    match (a.first_location(), b.first_location()) {
        (Some(la), Some(lb)) => la.cmp(lb).then_with(|| a.key.cmp(&b.key)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.key.cmp(&b.key),
    }
}

/// A translation catalog: header metadata plus ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub header: Option<Header>,
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(header: Header) -> Self {
        Self {
            header: Some(header),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Language declared in the header.
    pub fn language(&self) -> Option<&str> {
        self.header.as_ref().and_then(|h| h.language())
    }

    /// Entries not flagged obsolete.
    pub fn active_entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|e| !e.is_obsolete())
    }

    pub fn sort_entries(&mut self) {
        self.entries.sort_by(compare_entries);
    }

    /// Drop obsolete entries, returning how many were removed.
    pub fn remove_obsolete(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_obsolete());
        before - self.entries.len()
    }
}
