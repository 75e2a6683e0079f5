//! Markup scanner for view, data and template XML.
//!
//! Two kinds of content are extracted:
//! - values of translatable attributes (`string`, `help`, `placeholder`, ...)
//!   on any element, and `name` on elements where it is a visible label;
//! - text content of human-facing elements (`p`, `span`, `h1`, `button`, ...).
//!
//! Text under QWeb output directives (`t-esc`, `t-out`, `t-raw`, `t-field`)
//! is replaced at render time and never extracted. `translation="off"` and
//! `t-translation="off"` switch extraction off for the whole subtree.

use std::{collections::HashSet, sync::Arc};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use super::{FileScan, Scan};
use crate::{
    config::Config,
    core::{
        data::{Occurrence, OccurrenceKind, SourceLocation},
        error::ScanError,
    },
    utils::{LineIndex, contains_alphabetic},
};

const DYNAMIC_OUTPUT_DIRECTIVES: &[&str] = &["t-esc", "t-out", "t-raw", "t-field"];
const TRANSLATION_SWITCHES: &[&str] = &["translation", "t-translation"];

/// Which attributes and elements carry translatable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRules {
    pub translatable_attributes: HashSet<String>,
    pub name_attribute_elements: HashSet<String>,
    pub text_elements: HashSet<String>,
}

impl MarkupRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            translatable_attributes: config.translatable_attributes.iter().cloned().collect(),
            name_attribute_elements: config.name_attribute_elements.iter().cloned().collect(),
            text_elements: config.text_elements.iter().cloned().collect(),
        }
    }

    fn is_translatable_attribute(&self, element: &str, attribute: &str) -> bool {
        if attribute == "name" {
            return self.name_attribute_elements.contains(element);
        }
        self.translatable_attributes.contains(attribute)
    }
}

impl Default for MarkupRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone)]
pub struct MarkupScanner {
    rules: Arc<MarkupRules>,
}

impl MarkupScanner {
    pub fn new(rules: Arc<MarkupRules>) -> Self {
        Self { rules }
    }
}

struct OpenElement {
    name: String,
    line: usize,
    text_element: bool,
    /// Text in this subtree is not extracted.
    text_suppressed: bool,
    /// Nothing in this subtree is extracted.
    translation_off: bool,
}

/// Per-file scanning state.
struct MarkupPass<'a> {
    rules: &'a MarkupRules,
    text: &'a str,
    file_path: &'a str,
    lines: LineIndex,
    stack: Vec<OpenElement>,
    scan: FileScan,
}

impl Scan for MarkupScanner {
    fn scan(&self, text: &str, file_path: &str) -> Result<FileScan, ScanError> {
        let mut pass = MarkupPass {
            rules: &self.rules,
            text,
            file_path,
            lines: LineIndex::new(text),
            stack: Vec::new(),
            scan: FileScan::default(),
        };
        pass.run()?;
        Ok(pass.scan)
    }
}

impl MarkupPass<'_> {
    fn run(&mut self) -> Result<(), ScanError> {
        let mut reader = Reader::from_str(self.text);

        loop {
            let start = reader.buffer_position() as usize;
            let event = reader.read_event().map_err(|e| {
                let line = self.lines.line_of(reader.buffer_position() as usize);
                ScanError::new(line, format!("malformed markup: {}", e))
            })?;
            let end = reader.buffer_position() as usize;

            match event {
                Event::Start(tag) => {
                    let element = self.open_element(&tag, start, end)?;
                    self.stack.push(element);
                }
                Event::Empty(tag) => {
                    self.open_element(&tag, start, end)?;
                }
                Event::End(_) => {
                    self.stack.pop();
                }
                Event::Text(content) => {
                    let decoded = match content.unescape() {
                        Ok(text) => text,
                        Err(_) => String::from_utf8_lossy(&content),
                    };
                    self.text_node(&decoded, start, end);
                }
                // CDATA is literal text, never entity-decoded.
                Event::CData(content) => {
                    self.text_node(&String::from_utf8_lossy(&content), start, end);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match self.stack.last() {
            Some(open) => Err(ScanError::new(
                open.line,
                format!("element <{}> is never closed", open.name),
            )),
            None => Ok(()),
        }
    }

    /// Extract attributes of a start or empty tag and describe the element
    /// for the text nodes below it.
    fn open_element(
        &mut self,
        tag: &BytesStart<'_>,
        start: usize,
        end: usize,
    ) -> Result<OpenElement, ScanError> {
        let line = self.lines.line_of(start);
        let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
        let raw_tag = self.text.get(start..end).unwrap_or_default();

        let mut attributes = Vec::new();
        for attr in tag.attributes() {
            let attr = attr.map_err(|e| {
                ScanError::new(line, format!("malformed attribute in <{}>: {}", name, e))
            })?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            attributes.push((key, value));
        }

        let parent = self.stack.last();
        let switched_off = attributes
            .iter()
            .any(|(k, v)| TRANSLATION_SWITCHES.contains(&k.as_str()) && v.trim() == "off");
        let translation_off = switched_off || parent.is_some_and(|p| p.translation_off);
        let dynamic = attributes
            .iter()
            .any(|(k, _)| DYNAMIC_OUTPUT_DIRECTIVES.contains(&k.as_str()));
        let text_suppressed =
            translation_off || dynamic || parent.is_some_and(|p| p.text_suppressed);

        if !translation_off {
            for (key, value) in &attributes {
                let value = value.trim();
                if value.is_empty() || !self.rules.is_translatable_attribute(&name, key) {
                    continue;
                }
                let attr_line = attribute_offset(raw_tag, key)
                    .map(|offset| self.lines.line_of(start + offset))
                    .unwrap_or(line);
                self.scan.occurrences.push(Occurrence::new(
                    value,
                    SourceLocation::new(self.file_path, attr_line),
                    OccurrenceKind::MarkupAttribute(key.clone()),
                ));
            }
        }

        Ok(OpenElement {
            text_element: self.rules.text_elements.contains(&name),
            name,
            line,
            text_suppressed,
            translation_off,
        })
    }

    fn text_node(&mut self, decoded: &str, start: usize, end: usize) {
        let Some(parent) = self.stack.last() else {
            return;
        };
        if !parent.text_element || parent.text_suppressed {
            return;
        }

        let normalized = collapse_whitespace(decoded);
        if normalized.chars().count() < 2 || !contains_alphabetic(&normalized) {
            return;
        }

        let raw = self.text.get(start..end).unwrap_or_default();
        let leading = raw.len() - raw.trim_start().len();
        self.scan.occurrences.push(Occurrence::new(
            normalized,
            SourceLocation::new(self.file_path, self.lines.line_of(start + leading)),
            OccurrenceKind::MarkupText,
        ));
    }
}

/// Byte offset of `key=` inside a raw start tag.
fn attribute_offset(raw_tag: &str, key: &str) -> Option<usize> {
    raw_tag
        .match_indices(key)
        .map(|(i, _)| i)
        .find(|&i| {
            let preceded = raw_tag[..i]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace() || c == ':');
            let followed = raw_tag[i + key.len()..].trim_start().starts_with('=');
            preceded && followed
        })
}

/// Trim and fold internal whitespace runs (indentation, newlines) into one
/// space, so reformatting a view does not change its keys.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
