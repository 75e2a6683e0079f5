use std::fmt::Write as _;

use crate::core::data::{Catalog, CatalogEntry, Flag, compare_entries};

/// Reference lines are wrapped at this width.
const REFERENCE_WIDTH: usize = 76;

/// Render a catalog as text.
///
/// Entries are written in [`compare_entries`] order, so serializing the same
/// catalog twice gives byte-identical output regardless of the in-memory
/// order.
pub fn serialize(catalog: &Catalog) -> String {
    let mut out = String::new();

    if let Some(header) = &catalog.header {
        for comment in &header.comments {
            out.push_str(comment);
            out.push('\n');
        }
        write_flags(&mut out, "", header.flags.iter());
        write_string(&mut out, "", "msgid", "");
        write_string(&mut out, "", "msgstr", &header.to_msgstr());
    }

    let mut entries: Vec<&CatalogEntry> = catalog.entries.iter().collect();
    entries.sort_by(|a, b| compare_entries(a, b));

    for entry in entries {
        if !out.is_empty() {
            out.push('\n');
        }
        write_entry(&mut out, entry);
    }

    out
}

fn write_entry(out: &mut String, entry: &CatalogEntry) {
    let prefix = if entry.is_obsolete() { "#~ " } else { "" };

    for comment in &entry.translator_comments {
        if comment.is_empty() {
            let _ = writeln!(out, "{}#", prefix);
        } else {
            let _ = writeln!(out, "{}# {}", prefix, comment);
        }
    }
    for comment in &entry.comments {
        let _ = writeln!(out, "{}#. {}", prefix, comment);
    }
    write_references(out, prefix, entry);
    write_flags(
        out,
        prefix,
        entry.flags.iter().filter(|f| **f != Flag::Obsolete),
    );
    write_string(out, prefix, "msgid", &entry.key);
    write_string(out, prefix, "msgstr", &entry.translation);
}

fn write_references(out: &mut String, prefix: &str, entry: &CatalogEntry) {
    let mut line = String::new();
    for location in &entry.locations {
        let token = location.to_string();
        if !line.is_empty() && line.len() + 1 + token.len() > REFERENCE_WIDTH - 3 {
            let _ = writeln!(out, "{}#: {}", prefix, line);
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&token);
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}#: {}", prefix, line);
    }
}

fn write_flags<'a>(out: &mut String, prefix: &str, flags: impl Iterator<Item = &'a Flag>) {
    let flags: Vec<String> = flags.map(|f| f.to_string()).collect();
    if !flags.is_empty() {
        let _ = writeln!(out, "{}#, {}", prefix, flags.join(", "));
    }
}

/// Write `keyword "value"`, switching to one quoted chunk per line for
/// values with embedded newlines.
fn write_string(out: &mut String, prefix: &str, keyword: &str, value: &str) {
    let chunks: Vec<&str> = value.split_inclusive('\n').collect();
    if chunks.len() <= 1 {
        let _ = writeln!(out, "{}{} \"{}\"", prefix, keyword, escape(value));
        return;
    }
    let _ = writeln!(out, "{}{} \"\"", prefix, keyword);
    for chunk in chunks {
        let _ = writeln!(out, "{}\"{}\"", prefix, escape(chunk));
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
