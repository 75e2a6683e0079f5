use std::{mem, sync::LazyLock};

use regex::Regex;

use crate::core::{
    data::{Catalog, CatalogEntry, Flag, Header, SourceLocation},
    error::{ParseError, ParseErrorKind},
};

use super::strip_bom;

/// End of one `path:line` reference inside a `#:` comment.
static LINE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)(?:\s+|$)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Msgid,
    Msgstr,
}

/// An entry under construction.
#[derive(Debug, Default)]
struct Pending {
    /// Every comment line verbatim; becomes the header's preamble.
    raw_comments: Vec<String>,
    translator_comments: Vec<String>,
    comments: Vec<String>,
    locations: Vec<SourceLocation>,
    flags: Vec<Flag>,
    obsolete: bool,
    msgid: Option<(String, usize)>,
    msgstr: Option<String>,
    current: Option<Field>,
}

impl Pending {
    fn has_keyword(&self) -> bool {
        self.msgid.is_some() || self.msgstr.is_some()
    }
}

struct Parser {
    catalog: Catalog,
    pending: Pending,
}

/// Parse catalog text.
///
/// A leading byte-order mark is ignored. Duplicate keys are kept as
/// separate entries so validation can report them.
pub fn parse(text: &str) -> Result<Catalog, ParseError> {
    let (text, _) = strip_bom(text);
    let mut parser = Parser {
        catalog: Catalog::default(),
        pending: Pending::default(),
    };

    for (idx, raw_line) in text.lines().enumerate() {
        parser.line(raw_line, idx + 1)?;
    }
    parser.finish_entry()?;

    Ok(parser.catalog)
}

impl Parser {
    fn line(&mut self, raw_line: &str, line: usize) -> Result<(), ParseError> {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return self.finish_entry();
        }

        if let Some(rest) = trimmed.strip_prefix("#~") {
            self.pending.obsolete = true;
            let rest = rest.trim_start();
            if rest.is_empty() {
                return Ok(());
            }
            return self.content(rest, raw_line, line);
        }

        self.content(trimmed, raw_line, line)
    }

    fn content(&mut self, content: &str, raw_line: &str, line: usize) -> Result<(), ParseError> {
        if content.starts_with('#') {
            return self.comment(content, raw_line, line);
        }
        if content.starts_with('"') {
            let value = parse_quoted(content, line)?;
            return match self.pending.current {
                Some(Field::Msgid) => {
                    if let Some((key, _)) = self.pending.msgid.as_mut() {
                        key.push_str(&value);
                    }
                    Ok(())
                }
                Some(Field::Msgstr) => {
                    if let Some(translation) = self.pending.msgstr.as_mut() {
                        translation.push_str(&value);
                    }
                    Ok(())
                }
                None => Err(ParseError::new(
                    line,
                    ParseErrorKind::UnexpectedContent(content.to_string()),
                )),
            };
        }

        let (keyword, rest) = content
            .split_once(|c: char| c.is_whitespace())
            .unwrap_or((content, ""));
        match keyword {
            "msgid" => {
                if self.pending.msgstr.is_some() {
                    return Err(ParseError::new(line, ParseErrorKind::MissingSeparator));
                }
                if self.pending.msgid.is_some() {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::DuplicateKeyword("msgid"),
                    ));
                }
                let value = parse_quoted(rest.trim(), line)?;
                self.pending.msgid = Some((value, line));
                self.pending.current = Some(Field::Msgid);
                Ok(())
            }
            "msgstr" => {
                if self.pending.msgid.is_none() {
                    return Err(ParseError::new(line, ParseErrorKind::MsgstrWithoutMsgid));
                }
                if self.pending.msgstr.is_some() {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::DuplicateKeyword("msgstr"),
                    ));
                }
                let value = parse_quoted(rest.trim(), line)?;
                self.pending.msgstr = Some(value);
                self.pending.current = Some(Field::Msgstr);
                Ok(())
            }
            "msgctxt" | "msgid_plural" => Err(ParseError::new(
                line,
                ParseErrorKind::UnsupportedKeyword(keyword.to_string()),
            )),
            k if k.starts_with("msgstr[") => Err(ParseError::new(
                line,
                ParseErrorKind::UnsupportedKeyword("msgstr[N]".to_string()),
            )),
            _ => Err(ParseError::new(
                line,
                ParseErrorKind::UnexpectedContent(content.to_string()),
            )),
        }
    }

    fn comment(&mut self, content: &str, raw_line: &str, line: usize) -> Result<(), ParseError> {
        // A comment after the keywords means the next entry started without
        // a blank line.
        if self.pending.has_keyword() {
            return Err(ParseError::new(line, ParseErrorKind::MissingSeparator));
        }

        let pending = &mut self.pending;
        if let Some(rest) = content.strip_prefix("#,") {
            pending
                .flags
                .extend(rest.split(',').filter(|t| !t.trim().is_empty()).map(Flag::parse));
            return Ok(());
        }

        pending.raw_comments.push(raw_line.trim_end().to_string());
        if let Some(rest) = content.strip_prefix("#:") {
            pending
                .locations
                .extend(parse_references(rest));
        } else if let Some(rest) = content.strip_prefix("#.") {
            pending.comments.push(strip_one_space(rest).to_string());
        } else if content.starts_with("#|") {
            // Previous-msgid hints are advisory and regenerated by tools.
        } else if let Some(rest) = content.strip_prefix('#') {
            pending
                .translator_comments
                .push(strip_one_space(rest).to_string());
        }
        Ok(())
    }

    fn finish_entry(&mut self) -> Result<(), ParseError> {
        if !self.pending.has_keyword() {
            // Comment-only block: attach it to the next entry.
            return Ok(());
        }
        let pending = mem::take(&mut self.pending);
        let Some((key, msgid_line)) = pending.msgid else {
            return Ok(());
        };
        let Some(translation) = pending.msgstr else {
            return Err(ParseError::new(msgid_line, ParseErrorKind::MissingMsgstr));
        };

        if key.is_empty() && !pending.obsolete {
            if self.catalog.header.is_some() {
                return Err(ParseError::new(
                    msgid_line,
                    ParseErrorKind::UnexpectedContent("second header entry".to_string()),
                ));
            }
            let mut header = Header::from_msgstr(&translation);
            header.comments = pending.raw_comments;
            header.flags = pending.flags.into_iter().collect();
            header.line = Some(msgid_line);
            self.catalog.header = Some(header);
            return Ok(());
        }

        let mut entry = CatalogEntry {
            key,
            translation,
            comments: pending.comments,
            translator_comments: pending.translator_comments,
            flags: pending.flags.into_iter().collect(),
            line: Some(msgid_line),
            ..Default::default()
        };
        for location in pending.locations {
            entry.add_location(location);
        }
        if pending.obsolete {
            entry.flags.insert(Flag::Obsolete);
        }
        self.catalog.entries.push(entry);
        Ok(())
    }
}

fn strip_one_space(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}

/// Decode one `"..."` token.
fn parse_quoted(token: &str, line: usize) -> Result<String, ParseError> {
    let Some(body) = token.strip_prefix('"') else {
        return Err(ParseError::new(
            line,
            ParseErrorKind::UnexpectedContent(token.to_string()),
        ));
    };

    let mut value = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                let trailing = body[idx + 1..].trim();
                if !trailing.is_empty() {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::UnexpectedContent(trailing.to_string()),
                    ));
                }
                return Ok(value);
            }
            '\\' => match chars.next().map(|(_, e)| e) {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('\\') => value.push('\\'),
                Some('"') => value.push('"'),
                Some('\'') => value.push('\''),
                Some('a') => value.push('\u{7}'),
                Some('b') => value.push('\u{8}'),
                Some('f') => value.push('\u{c}'),
                Some('v') => value.push('\u{b}'),
                Some(other) => {
                    return Err(ParseError::new(line, ParseErrorKind::InvalidEscape(other)));
                }
                None => return Err(ParseError::new(line, ParseErrorKind::UnterminatedString)),
            },
            c => value.push(c),
        }
    }
    Err(ParseError::new(line, ParseErrorKind::UnterminatedString))
}

/// Split a `#:` comment into locations. References end at `:<line>`, so
/// a path may contain spaces; tokens without a line number are
/// whitespace-separated.
fn parse_references(text: &str) -> Vec<SourceLocation> {
    let mut locations = Vec::new();
    let mut start = 0;
    for caps in LINE_SUFFIX.captures_iter(text) {
        let (Some(whole), Some(line)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let mut path = text[start..whole.start()].trim();
        start = whole.end();
        // Leading `model:...` style references carry no line number.
        while let Some((head, tail)) = path.split_once(char::is_whitespace)
            && head.contains(':')
        {
            locations.push(SourceLocation::parse(head));
            path = tail.trim_start();
        }
        if path.is_empty() {
            continue;
        }
        match line.as_str().parse::<usize>() {
            Ok(line) => locations.push(SourceLocation::new(path, line)),
            Err(_) => locations.push(SourceLocation::parse(path)),
        }
    }
    locations.extend(text[start..].split_whitespace().map(SourceLocation::parse));
    locations
}
